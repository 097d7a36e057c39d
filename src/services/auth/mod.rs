pub mod error;
pub mod factory;
pub mod identity;
pub mod jwt;

pub use error::{AuthConfigError, AuthError};
pub use factory::build_verifier;
pub use identity::{Claims, Identity};
pub use jwt::JwtVerifier;
