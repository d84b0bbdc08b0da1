//! Dock status

use serde::{Deserialize, Serialize};

/// Availability of a loading dock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DockStatus {
    Free,
    Occupied,
    OutOfService,
}

impl DockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DockStatus::Free => "Free",
            DockStatus::Occupied => "Occupied",
            DockStatus::OutOfService => "OutOfService",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Free" => Some(DockStatus::Free),
            "Occupied" => Some(DockStatus::Occupied),
            "OutOfService" => Some(DockStatus::OutOfService),
            _ => None,
        }
    }
}
