//! Bearer token validation for the admin API.
//!
//! Login and token issuance live with the external identity provider; this
//! module only verifies RS256 access tokens and exposes the caller's roles.

mod jwks;
mod validator;

pub mod guards;
pub mod model;

pub use jwks::JwksClient;
pub use validator::JwtValidator;
