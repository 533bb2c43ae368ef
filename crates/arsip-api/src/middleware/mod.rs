//! HTTP middleware: request logging, CORS, and RBAC helpers.

pub mod cors;
pub mod logging;
pub mod rbac;
