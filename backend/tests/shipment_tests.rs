//! Shipment tests
//!
//! Tests for shipment direction/status codes and the order-link predicate.

use proptest::prelude::*;
use shared::models::{validate_order_link, LinkError, ShipmentStatus, ShipmentType};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Direction codes are the single letters used on the wire
    #[test]
    fn test_type_codes() {
        assert_eq!(ShipmentType::Incoming.as_str(), "I");
        assert_eq!(ShipmentType::Outgoing.as_str(), "O");
        assert_eq!(ShipmentType::from_str("I"), Some(ShipmentType::Incoming));
        assert_eq!(ShipmentType::from_str("O"), Some(ShipmentType::Outgoing));
        assert_eq!(ShipmentType::from_str("B"), None);
        assert_eq!(ShipmentType::from_str("o"), None);
    }

    /// Status strings round-trip through the parser
    #[test]
    fn test_status_round_trip() {
        for status in [
            ShipmentStatus::Pending,
            ShipmentStatus::Transit,
            ShipmentStatus::Delivered,
        ] {
            assert_eq!(ShipmentStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(ShipmentStatus::from_str("Lost"), None);
    }

    /// Full truth table for the link predicate
    #[test]
    fn test_link_truth_table() {
        let cases = [
            (ShipmentType::Outgoing, ShipmentStatus::Pending, None),
            (ShipmentType::Outgoing, ShipmentStatus::Transit, None),
            (
                ShipmentType::Outgoing,
                ShipmentStatus::Delivered,
                Some(LinkError::DeliveredShipment),
            ),
            (
                ShipmentType::Incoming,
                ShipmentStatus::Pending,
                Some(LinkError::IncomingShipment),
            ),
            (
                ShipmentType::Incoming,
                ShipmentStatus::Transit,
                Some(LinkError::IncomingShipment),
            ),
            (
                ShipmentType::Incoming,
                ShipmentStatus::Delivered,
                Some(LinkError::IncomingShipment),
            ),
        ];

        for (shipment_type, shipment_status, expected) in cases {
            let result = validate_order_link(shipment_type, shipment_status);
            assert_eq!(result.err(), expected);
        }
    }

    /// Both rejection reasons carry their exact messages
    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            LinkError::IncomingShipment.to_string(),
            "cannot link order with an incoming shipment"
        );
        assert_eq!(
            LinkError::DeliveredShipment.to_string(),
            "cannot link order with Delivered shipment"
        );
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn type_strategy() -> impl Strategy<Value = ShipmentType> {
        prop_oneof![Just(ShipmentType::Incoming), Just(ShipmentType::Outgoing)]
    }

    fn status_strategy() -> impl Strategy<Value = ShipmentStatus> {
        prop_oneof![
            Just(ShipmentStatus::Pending),
            Just(ShipmentStatus::Transit),
            Just(ShipmentStatus::Delivered),
        ]
    }

    proptest! {
        /// Property: a link is accepted exactly for non-delivered outbound
        /// shipments
        #[test]
        fn prop_link_acceptance(
            shipment_type in type_strategy(),
            shipment_status in status_strategy()
        ) {
            let accepted = validate_order_link(shipment_type, shipment_status).is_ok();
            let expected = shipment_type == ShipmentType::Outgoing
                && shipment_status != ShipmentStatus::Delivered;
            prop_assert_eq!(accepted, expected);
        }

        /// Property: incoming shipments always report the direction reason,
        /// whatever their status
        #[test]
        fn prop_incoming_reason_wins(shipment_status in status_strategy()) {
            let err = validate_order_link(ShipmentType::Incoming, shipment_status).unwrap_err();
            prop_assert_eq!(err, LinkError::IncomingShipment);
        }
    }
}
