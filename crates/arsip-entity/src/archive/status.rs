//! Archive retention status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle phase of an archived record, derived from its document date
/// and retention schedule.
///
/// The phases are strictly ordered: a record only moves forward as it
/// ages, never backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "archive_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArchiveStatus {
    /// Within the active retention period; the record is in regular use.
    Active,
    /// Past the active period but still retained for occasional reference.
    Inactive,
    /// The full retention period has elapsed; the record may be disposed
    /// of or transferred to a records center.
    DisposeEligible,
}

impl ArchiveStatus {
    /// Position in the lifecycle (higher = further along). Useful for
    /// asserting that aging never moves a record backward.
    pub fn severity(&self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Inactive => 1,
            Self::DisposeEligible => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::DisposeEligible => "DISPOSE_ELIGIBLE",
        }
    }
}

impl fmt::Display for ArchiveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ArchiveStatus {
    type Err = arsip_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "DISPOSE_ELIGIBLE" => Ok(Self::DisposeEligible),
            _ => Err(arsip_core::AppError::validation(format!(
                "Invalid archive status: '{s}'. Expected one of: ACTIVE, INACTIVE, DISPOSE_ELIGIBLE"
            ))),
        }
    }
}
