//! Transfer status lifecycle

use serde::{Deserialize, Serialize};

/// Status of an internal stock transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    Pending,
    Processed,
}

impl TransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "Pending",
            TransferStatus::Processed => "Processed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(TransferStatus::Pending),
            "Processed" => Some(TransferStatus::Processed),
            _ => None,
        }
    }
}
