//! Loan (peminjaman) services.

pub mod service;

pub use service::{CreateLoanInput, LoanService, LoanView};
