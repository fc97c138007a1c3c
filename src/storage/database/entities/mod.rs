//! SeaORM entity definitions

pub mod password_reset_token;
pub mod user;
pub mod verification_request;

pub use password_reset_token::Entity as PasswordResetToken;
pub use user::Entity as User;
pub use verification_request::Entity as VerificationRequest;
