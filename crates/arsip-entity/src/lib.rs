//! # arsip-entity
//!
//! Domain entities for the Arsip Hub records management service.
//!
//! Every struct here maps to a database row or a derived domain value.
//! The retention status engine lives in [`archive::retention`] and is a
//! pure function of dates and classification codes, so the same rules
//! apply at intake, on read, and during bulk recalculation.

pub mod archive;
pub mod handover;
pub mod loan;
pub mod user;

pub use archive::{Archive, ArchiveStatus, ClassificationRule, RetentionAssessment};
pub use handover::{DecisionOutcome, HandoverArchive, HandoverDecision, HandoverProposal, HandoverStatus};
pub use loan::Loan;
pub use user::{User, UserRole};
