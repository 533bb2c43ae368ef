//! Handover proposal status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// State of a handover proposal.
///
/// Proposals start as `Pending` and move exactly once to `Approved` or
/// `Rejected`. The terminal states are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "handover_status", rename_all = "lowercase")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HandoverStatus {
    /// Submitted and awaiting an administrator's decision.
    Pending,
    /// Accepted; the archives were formally handed over.
    Approved,
    /// Declined; the archives stay with their owner.
    Rejected,
}

impl HandoverStatus {
    /// Terminal proposals can never change state again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for HandoverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HandoverStatus {
    type Err = arsip_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(arsip_core::AppError::validation(format!(
                "Invalid handover status: '{s}'. Expected one of: PENDING, APPROVED, REJECTED"
            ))),
        }
    }
}
