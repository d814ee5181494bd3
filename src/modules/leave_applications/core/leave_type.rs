// Closed leave-type vocabulary shared with the backend.
//
// Purpose
// - Map each leave type to the exact code the backend accepts.
//
// Boundaries
// - Parsing is exact. Codes from other vocabularies (for example "annual" or "mc")
//   are unknown, never translated, so client and server cannot silently diverge.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveType {
    #[serde(rename = "AL")]
    Annual,
    #[serde(rename = "MC")]
    Medical,
    #[serde(rename = "HL")]
    Hospitalization,
    #[serde(rename = "EL")]
    Emergency,
    #[serde(rename = "other")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown leave type code: {0}")]
pub struct UnknownLeaveType(pub String);

impl LeaveType {
    pub const ALL: [LeaveType; 5] = [
        LeaveType::Annual,
        LeaveType::Medical,
        LeaveType::Hospitalization,
        LeaveType::Emergency,
        LeaveType::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            LeaveType::Annual => "AL",
            LeaveType::Medical => "MC",
            LeaveType::Hospitalization => "HL",
            LeaveType::Emergency => "EL",
            LeaveType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Annual => "Annual Leave",
            LeaveType::Medical => "Medical Certificate (MC)",
            LeaveType::Hospitalization => "Hospitalization Leave",
            LeaveType::Emergency => "Emergency Leave",
            LeaveType::Other => "Other",
        }
    }

    /// Only medical leave carries a supporting certificate.
    pub fn takes_attachment(&self) -> bool {
        matches!(self, LeaveType::Medical)
    }
}

impl FromStr for LeaveType {
    type Err = UnknownLeaveType;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        LeaveType::ALL
            .into_iter()
            .find(|leave_type| leave_type.code() == code)
            .ok_or_else(|| UnknownLeaveType(code.to_string()))
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
