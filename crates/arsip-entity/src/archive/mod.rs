//! Archive domain entities and the retention status engine.

pub mod model;
pub mod retention;
pub mod status;

pub use model::{Archive, CreateArchive};
pub use retention::{ClassificationRule, RetentionAssessment, RETENTION_RULES};
pub use status::ArchiveStatus;
