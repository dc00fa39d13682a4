//! Application Error
//!
//! [`AppError`] は全クレート共通のエラー表現です。種別、クライアント向け
//! メッセージ、検証失敗時のフィールド詳細、ログ専用の元エラーを持ちます。

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde::Serialize;

use super::kind::ErrorKind;

/// 5xx のときクライアントへ返す唯一のメッセージ
pub const INTERNAL_MESSAGE: &str = "something went wrong";

type BoxedSource = Box<dyn Error + Send + Sync + 'static>;

/// フィールド単位の検証エラー（エンベロープの `fields` 要素）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 統一エラー型
///
/// ```rust
/// use kernel::error::app_error::{AppError, FieldError};
///
/// let err = AppError::validation(vec![FieldError::new("email", "email is required")]);
/// assert_eq!(err.status_code(), 422);
/// assert_eq!(err.fields()[0].field, "email");
///
/// let err = AppError::internal().with_source(std::io::Error::other("disk on fire"));
/// assert_eq!(err.message(), "something went wrong");
/// ```
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    fields: Vec<FieldError>,
    source: Option<BoxedSource>,
}

pub type AppResult<T> = Result<T, AppError>;

/// 種別ごとのショートカットコンストラクタ
macro_rules! shortcuts {
    ($($name:ident => $kind:ident),* $(,)?) => {
        $(
            #[inline]
            pub fn $name(message: impl Into<Cow<'static, str>>) -> Self {
                Self::new(ErrorKind::$kind, message)
            }
        )*
    };
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            fields: Vec::new(),
            source: None,
        }
    }

    shortcuts! {
        bad_request => BadRequest,
        unauthorized => Unauthorized,
        forbidden => Forbidden,
        not_found => NotFound,
        conflict => Conflict,
        too_many_requests => TooManyRequests,
    }

    /// 422、フィールド詳細付き
    pub fn validation(fields: Vec<FieldError>) -> Self {
        Self {
            fields,
            ..Self::new(ErrorKind::UnprocessableEntity, "validation failed")
        }
    }

    /// 500、メッセージは常に [`INTERNAL_MESSAGE`]
    ///
    /// 原因は [`Self::with_source`] で付けてログにだけ残します。
    pub fn internal() -> Self {
        Self::new(ErrorKind::InternalServerError, INTERNAL_MESSAGE)
    }

    pub fn with_source<E>(self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            source: Some(Box::new(source)),
            ..self
        }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status_code(), self.kind, self.message)?;
        match &self.source {
            Some(source) => write!(f, " ({})", source),
            None => Ok(()),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_deref().map(|e| e as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_status_codes() {
        let codes: Vec<u16> = [
            AppError::bad_request("x"),
            AppError::unauthorized("x"),
            AppError::forbidden("x"),
            AppError::not_found("x"),
            AppError::conflict("x"),
            AppError::validation(Vec::new()),
            AppError::too_many_requests("x"),
            AppError::internal(),
        ]
        .iter()
        .map(AppError::status_code)
        .collect();

        assert_eq!(codes, vec![400, 401, 403, 404, 409, 422, 429, 500]);
    }

    #[test]
    fn test_validation_keeps_fields() {
        let err = AppError::validation(vec![FieldError::new("price", "price is required")]);
        assert_eq!(err.message(), "validation failed");
        assert_eq!(err.fields(), &[FieldError::new("price", "price is required")]);
    }

    #[test]
    fn test_internal_hides_source() {
        let err = AppError::internal().with_source(std::io::Error::other("connection reset"));
        assert_eq!(err.message(), INTERNAL_MESSAGE);
        assert!(err.is_server_error());
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("connection reset"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            AppError::not_found("product not found").to_string(),
            "404 Not Found: product not found"
        );
    }
}
