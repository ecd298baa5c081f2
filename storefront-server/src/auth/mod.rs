//! Authentication
//!
//! JWT verification and the [`CurrentUser`] extractor. Token issuance is the
//! identity collaborator's job; this module only verifies.

mod extractor;
mod jwt;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService, ROLE_ADMIN};
