//! Loan (peminjaman) domain entities.

pub mod model;

pub use model::{CreateLoan, Loan, DEFAULT_LOAN_DAYS};
