//! # arsip-auth
//!
//! Authentication building blocks: JWT issuance and verification, and
//! Argon2id password hashing with strength checks. Tokens are stateless;
//! a token stays valid until it expires.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
