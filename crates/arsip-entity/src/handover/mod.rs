//! Handover (serah terima) domain entities.

pub mod decision;
pub mod model;
pub mod status;

pub use decision::{DecisionOutcome, HandoverDecision};
pub use model::{CreateHandover, HandoverArchive, HandoverProposal};
pub use status::HandoverStatus;
