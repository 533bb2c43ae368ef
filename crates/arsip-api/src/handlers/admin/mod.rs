//! Admin-only handlers.

pub mod recalculation;
pub mod users;
