//! Error Kind - Classification of errors
//!
//! [`ErrorKind`] は API が返しうるステータスだけを列挙します。

use std::fmt;

/// エラー種別
///
/// 各バリアントはちょうど一つの HTTP ステータスに対応します。
/// 5xx の詳細はログ専用で、レスポンスには固定文言のみを返します。
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::NotFound.status_code(), 404);
/// assert_eq!(ErrorKind::UnprocessableEntity.to_string(), "Unprocessable Entity");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// リクエストボディを JSON として解釈できない
    BadRequest,
    /// セッショントークンが無い、または無効
    Unauthorized,
    /// トークンの主体がユーザー ID として解釈できない
    Forbidden,
    /// 対象が存在しない、または呼び出し元の所有物ではない
    NotFound,
    /// メールアドレスが登録済み
    Conflict,
    /// フィールド単位の検証エラー
    UnprocessableEntity,
    /// レート制限超過
    TooManyRequests,
    /// サーバー内部エラー
    InternalServerError,
}

impl ErrorKind {
    const fn parts(&self) -> (u16, &'static str) {
        match self {
            ErrorKind::BadRequest => (400, "Bad Request"),
            ErrorKind::Unauthorized => (401, "Unauthorized"),
            ErrorKind::Forbidden => (403, "Forbidden"),
            ErrorKind::NotFound => (404, "Not Found"),
            ErrorKind::Conflict => (409, "Conflict"),
            ErrorKind::UnprocessableEntity => (422, "Unprocessable Entity"),
            ErrorKind::TooManyRequests => (429, "Too Many Requests"),
            ErrorKind::InternalServerError => (500, "Internal Server Error"),
        }
    }

    /// HTTP ステータスコード
    #[inline]
    pub const fn status_code(&self) -> u16 {
        self.parts().0
    }

    /// 標準の理由フレーズ
    #[inline]
    pub const fn reason(&self) -> &'static str {
        self.parts().1
    }

    /// 5xx かどうか
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 4xx かどうか
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status_code(), 400..=499)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}
