//! Archive intake, retention, and maintenance services.

pub mod recalculation;
pub mod service;

pub use recalculation::{RecalculationService, RecalculationSummary};
pub use service::{
    ArchiveService, ArchiveWithAssessment, CreateArchiveInput, ImportError, ImportSummary,
    UpdateArchiveInput,
};
