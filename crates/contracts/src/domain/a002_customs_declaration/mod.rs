pub mod aggregate;
pub mod auth;

pub use aggregate::CustomsDeclaration;
pub use auth::CustomsAuthResponse;
