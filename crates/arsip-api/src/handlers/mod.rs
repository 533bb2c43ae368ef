//! HTTP request handlers, one module per domain.

pub mod admin;
pub mod archive;
pub mod auth;
pub mod classification;
pub mod handover;
pub mod health;
pub mod loan;
