//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod notifier;
pub mod sign_in;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use notifier::WelcomeNotifier;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
