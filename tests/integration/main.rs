//! End-to-end tests against the full router and a real PostgreSQL
//! database. Every test is `#[ignore]`d so the default `cargo test` run
//! stays database-free; run them with:
//!
//! ```text
//! cargo test --test integration -- --ignored --test-threads=1
//! ```
//!
//! Tests create their own uniquely-named users and records and only
//! assert on those, so leftover rows from earlier runs are harmless.

mod helpers;

mod auth_test;
mod handover_test;
mod loan_test;
