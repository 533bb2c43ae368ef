//! Handover (serah terima) services.

pub mod decision;
pub mod service;

pub use decision::{plan_decision, DecideHandoverInput};
pub use service::{
    AvailabilityReport, CreateHandoverInput, HandoverDecisionView, HandoverService,
    HandoverWithArchives,
};
