//! Review decisions
//!
//! A case starts with no review status. An officer moves it to one of the
//! terminal values below exactly once.

use serde::{Deserialize, Serialize};

/// Officer decision on a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// The asset checks out, release the loan
    Approved,
    /// The submission is rejected
    Rejected,
}

impl Decision {
    /// Wire name of the decision
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approved" | "approve" => Ok(Self::Approved),
            "rejected" | "reject" => Ok(Self::Rejected),
            _ => Err(format!("Invalid action: {s}. Use: Approved, Rejected")),
        }
    }
}
