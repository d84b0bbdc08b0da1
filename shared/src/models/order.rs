//! Order status lifecycle and transition rules

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order status in the fulfillment lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Packed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Packed => "Packed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(OrderStatus::Pending),
            "Packed" => Some(OrderStatus::Packed),
            "Shipped" => Some(OrderStatus::Shipped),
            "Delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }

    /// Position in the fulfillment sequence Pending < Packed < Shipped < Delivered.
    pub fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Packed => 1,
            OrderStatus::Shipped => 2,
            OrderStatus::Delivered => 3,
        }
    }

    /// Delivered is terminal; no further status change is accepted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }
}

/// Rejected status change
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Unable to change order status back from Delivered")]
    RegressionFromDelivered,
}

/// Validate a status change against the lifecycle rules.
///
/// Only the terminal rule is enforced: once an order is Delivered, any change
/// to a different status is rejected. Skipping forward (e.g. Pending straight
/// to Delivered) and regressions between non-terminal statuses are accepted.
pub fn validate_transition(
    current: OrderStatus,
    next: OrderStatus,
) -> Result<(), TransitionError> {
    if current.is_terminal() && next != current {
        return Err(TransitionError::RegressionFromDelivered);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Packed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    #[test]
    fn rank_follows_fulfillment_sequence() {
        for pair in ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn as_str_round_trips() {
        for status in ALL {
            assert_eq!(OrderStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::from_str("delivered"), None);
        assert_eq!(OrderStatus::from_str(""), None);
    }

    #[test]
    fn delivered_is_the_only_terminal_status() {
        for status in ALL {
            assert_eq!(status.is_terminal(), status == OrderStatus::Delivered);
        }
    }

    #[test]
    fn non_terminal_transitions_are_unrestricted() {
        for from in ALL {
            for to in ALL {
                if from != OrderStatus::Delivered {
                    assert_eq!(validate_transition(from, to), Ok(()));
                }
            }
        }
    }

    #[test]
    fn delivered_rejects_any_other_target() {
        for to in [OrderStatus::Pending, OrderStatus::Packed, OrderStatus::Shipped] {
            let err = validate_transition(OrderStatus::Delivered, to).unwrap_err();
            assert_eq!(err, TransitionError::RegressionFromDelivered);
            assert!(err
                .to_string()
                .contains("Unable to change order status back from Delivered"));
        }
    }

    #[test]
    fn delivered_to_delivered_is_accepted() {
        assert_eq!(
            validate_transition(OrderStatus::Delivered, OrderStatus::Delivered),
            Ok(())
        );
    }
}
