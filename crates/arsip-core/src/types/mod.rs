//! Common value types shared across crates.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
