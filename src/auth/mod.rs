//! Bearer token authentication for the clinic API.

pub mod jwt;

pub use jwt::{Claims, TokenError, TokenVerifier};
