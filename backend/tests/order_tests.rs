//! Order fulfillment tests
//!
//! Tests for the order workflow including:
//! - Status monotonicity: Delivered is terminal
//! - Stock conservation across successful creations
//! - Overselling prevention with exact shortfall reporting
//! - Shipment link gating during creation

use std::collections::HashMap;

use proptest::prelude::*;
use shared::models::{
    validate_order_link, validate_transition, OrderStatus, ShipmentStatus, ShipmentType,
};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Pending orders accept any forward move
    #[test]
    fn test_pending_can_move_anywhere() {
        for target in [
            OrderStatus::Pending,
            OrderStatus::Packed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ] {
            assert!(validate_transition(OrderStatus::Pending, target).is_ok());
        }
    }

    /// Skipping intermediate statuses is allowed
    #[test]
    fn test_skip_to_delivered() {
        assert!(validate_transition(OrderStatus::Pending, OrderStatus::Delivered).is_ok());
        assert!(validate_transition(OrderStatus::Packed, OrderStatus::Delivered).is_ok());
    }

    /// Delivered rejects every regression with the exact message
    #[test]
    fn test_delivered_is_terminal() {
        for target in [
            OrderStatus::Pending,
            OrderStatus::Packed,
            OrderStatus::Shipped,
        ] {
            let err = validate_transition(OrderStatus::Delivered, target).unwrap_err();
            assert!(err
                .to_string()
                .contains("Unable to change order status back from Delivered"));
        }
    }

    /// Setting Delivered again is not a regression
    #[test]
    fn test_delivered_to_delivered_allowed() {
        assert!(validate_transition(OrderStatus::Delivered, OrderStatus::Delivered).is_ok());
    }

    /// A rejected transition leaves the stored status untouched
    #[test]
    fn test_rejected_transition_keeps_status() {
        let mut status = OrderStatus::Pending;

        status = super::integration_helpers::apply_status_update(status, OrderStatus::Delivered)
            .expect("Pending -> Delivered is allowed");
        assert_eq!(status, OrderStatus::Delivered);

        let result = super::integration_helpers::apply_status_update(status, OrderStatus::Pending);
        assert!(result.is_err());
        assert_eq!(status, OrderStatus::Delivered);
    }

    /// Status ranks are strictly increasing along the lifecycle
    #[test]
    fn test_status_rank_order() {
        assert!(OrderStatus::Pending.rank() < OrderStatus::Packed.rank());
        assert!(OrderStatus::Packed.rank() < OrderStatus::Shipped.rank());
        assert!(OrderStatus::Shipped.rank() < OrderStatus::Delivered.rank());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn status_strategy() -> impl Strategy<Value = OrderStatus> {
        prop_oneof![
            Just(OrderStatus::Pending),
            Just(OrderStatus::Packed),
            Just(OrderStatus::Shipped),
            Just(OrderStatus::Delivered),
        ]
    }

    proptest! {
        /// Property: a transition fails exactly when it leaves Delivered
        #[test]
        fn prop_only_delivered_regressions_fail(
            from in status_strategy(),
            to in status_strategy()
        ) {
            let result = validate_transition(from, to);
            let should_fail = from == OrderStatus::Delivered && to != OrderStatus::Delivered;
            prop_assert_eq!(result.is_err(), should_fail);
        }

        /// Property: stock conservation - available drops by exactly the sum
        /// of reserved amounts, ordered grows by the same sum
        #[test]
        fn prop_stock_conservation(
            initial in 0i64..10_000,
            amounts in prop::collection::vec(1i64..50, 0..20)
        ) {
            let mut ledger = super::integration_helpers::ledger_with("P000001", initial);
            let mut reserved_total = 0i64;

            for amount in amounts {
                if super::integration_helpers::create_order(
                    &mut ledger,
                    &HashMap::new(),
                    &[("P000001", amount)],
                    &[],
                )
                .is_ok()
                {
                    reserved_total += amount;
                }
            }

            let entry = &ledger["P000001"];
            prop_assert_eq!(entry.available, initial - reserved_total);
            prop_assert_eq!(entry.ordered, reserved_total);
        }

        /// Property: a request above the available count always fails and
        /// changes nothing
        #[test]
        fn prop_overselling_rejected(
            available in 0i64..1_000,
            excess in 1i64..1_000
        ) {
            let mut ledger = super::integration_helpers::ledger_with("P000001", available);
            let requested = available + excess;

            let result = super::integration_helpers::create_order(
                &mut ledger,
                &HashMap::new(),
                &[("P000001", requested)],
                &[],
            );

            let err = result.unwrap_err();
            prop_assert!(err.contains(&format!("only {} available", available)));
            prop_assert_eq!(ledger["P000001"].available, available);
            prop_assert_eq!(ledger["P000001"].ordered, 0);
        }

        /// Property: reservations never drive available below zero when it
        /// started non-negative
        #[test]
        fn prop_no_new_negative_available(
            initial in 0i64..500,
            amounts in prop::collection::vec(1i64..100, 1..30)
        ) {
            let mut ledger = super::integration_helpers::ledger_with("P000001", initial);

            for amount in amounts {
                let _ = super::integration_helpers::create_order(
                    &mut ledger,
                    &HashMap::new(),
                    &[("P000001", amount)],
                    &[],
                );
            }

            prop_assert!(ledger["P000001"].available >= 0);
        }
    }
}

// ============================================================================
// Integration Test Helpers (workflow simulation)
// ============================================================================

#[cfg(test)]
mod integration_helpers {
    use super::*;

    /// In-memory stand-in for an inventory counter row
    #[derive(Debug, Clone)]
    pub struct LedgerEntry {
        pub on_hand: i64,
        pub expected: i64,
        pub ordered: i64,
        pub allocated: i64,
        pub available: i64,
    }

    /// Read view of a shipment, as the link validator sees it
    #[derive(Debug, Clone, Copy)]
    pub struct ShipmentView {
        pub shipment_type: ShipmentType,
        pub shipment_status: ShipmentStatus,
    }

    pub type Ledger = HashMap<&'static str, LedgerEntry>;

    /// Build a one-item ledger where everything on hand is available
    pub fn ledger_with(item: &'static str, available: i64) -> Ledger {
        let mut ledger = HashMap::new();
        ledger.insert(
            item,
            LedgerEntry {
                on_hand: available,
                expected: 0,
                ordered: 0,
                allocated: 0,
                available,
            },
        );
        ledger
    }

    /// Mirror of the service-side availability check
    pub fn check_availability(ledger: &Ledger, item: &str, requested: i64) -> Result<i64, String> {
        let entry = ledger
            .get(item)
            .ok_or_else(|| format!("Inventory for item {} not found", item))?;

        if requested > entry.available {
            return Err(format!(
                "Insufficient stock for {}: only {} available",
                item, entry.available
            ));
        }

        Ok(entry.available)
    }

    /// Mirror of the service-side reservation
    pub fn reserve(ledger: &mut Ledger, item: &'static str, amount: i64) {
        let entry = ledger.get_mut(item).expect("reserve follows a passed check");
        entry.available -= amount;
        entry.ordered += amount;
    }

    /// Mirror of the order creation sequencing: all availability checks,
    /// then all shipment links, then the reservations.
    pub fn create_order(
        ledger: &mut Ledger,
        shipments: &HashMap<i64, ShipmentView>,
        lines: &[(&'static str, i64)],
        links: &[i64],
    ) -> Result<(), String> {
        for (item, amount) in lines {
            check_availability(ledger, item, *amount)?;
        }

        for shipment_id in links {
            let shipment = shipments
                .get(shipment_id)
                .ok_or_else(|| format!("Shipment {} not found", shipment_id))?;
            validate_order_link(shipment.shipment_type, shipment.shipment_status)
                .map_err(|e| e.to_string())?;
        }

        for (item, amount) in lines {
            reserve(ledger, item, *amount);
        }

        Ok(())
    }

    /// Mirror of the service-side status update
    pub fn apply_status_update(
        current: OrderStatus,
        next: OrderStatus,
    ) -> Result<OrderStatus, String> {
        validate_transition(current, next).map_err(|e| e.to_string())?;
        Ok(next)
    }

    fn outbound_pending() -> HashMap<i64, ShipmentView> {
        let mut shipments = HashMap::new();
        shipments.insert(
            9102,
            ShipmentView {
                shipment_type: ShipmentType::Outgoing,
                shipment_status: ShipmentStatus::Pending,
            },
        );
        shipments
    }

    /// Scenario: 1 unit of P000001 against 5 available, linked to a pending
    /// outbound shipment - creation succeeds and the counters move
    #[test]
    fn test_create_order_reserves_stock() {
        let mut ledger = ledger_with("P000001", 5);
        let shipments = outbound_pending();

        create_order(&mut ledger, &shipments, &[("P000001", 1)], &[9102])
            .expect("order should be created");

        assert_eq!(ledger["P000001"].available, 4);
        assert_eq!(ledger["P000001"].ordered, 1);
        assert_eq!(ledger["P000001"].on_hand, 5);
    }

    /// Scenario: 6 units against 5 available - conflict naming the exact
    /// count, counters untouched
    #[test]
    fn test_create_order_insufficient_stock() {
        let mut ledger = ledger_with("P000001", 5);
        let shipments = outbound_pending();

        let err = create_order(&mut ledger, &shipments, &[("P000001", 6)], &[9102]).unwrap_err();

        assert!(err.contains("only 5 available"));
        assert_eq!(ledger["P000001"].available, 5);
        assert_eq!(ledger["P000001"].ordered, 0);
    }

    /// Scenario: deliver an order, then try to reopen it
    #[test]
    fn test_delivered_order_stays_delivered() {
        let status = apply_status_update(OrderStatus::Pending, OrderStatus::Delivered)
            .expect("Pending -> Delivered is allowed");

        let err = apply_status_update(status, OrderStatus::Pending).unwrap_err();
        assert!(err.contains("Unable to change order status back from Delivered"));
    }

    /// Linking to an incoming shipment fails regardless of stock
    #[test]
    fn test_incoming_shipment_blocks_creation() {
        let mut ledger = ledger_with("P000001", 100);
        let mut shipments = HashMap::new();
        shipments.insert(
            7001,
            ShipmentView {
                shipment_type: ShipmentType::Incoming,
                shipment_status: ShipmentStatus::Pending,
            },
        );

        let err = create_order(&mut ledger, &shipments, &[("P000001", 1)], &[7001]).unwrap_err();

        assert!(err.contains("cannot link order with an incoming shipment"));
        assert_eq!(ledger["P000001"].available, 100);
    }

    /// Linking to a delivered shipment fails before anything is reserved
    #[test]
    fn test_delivered_shipment_blocks_creation() {
        let mut ledger = ledger_with("P000001", 100);
        let mut shipments = HashMap::new();
        shipments.insert(
            7002,
            ShipmentView {
                shipment_type: ShipmentType::Outgoing,
                shipment_status: ShipmentStatus::Delivered,
            },
        );

        let err = create_order(&mut ledger, &shipments, &[("P000001", 1)], &[7002]).unwrap_err();

        assert!(err.contains("cannot link order with Delivered shipment"));
        assert_eq!(ledger["P000001"].available, 100);
        assert_eq!(ledger["P000001"].ordered, 0);
    }

    /// Stock shortfalls are reported before shipment link violations
    #[test]
    fn test_stock_checked_before_links() {
        let mut ledger = ledger_with("P000001", 0);
        let mut shipments = HashMap::new();
        shipments.insert(
            7003,
            ShipmentView {
                shipment_type: ShipmentType::Incoming,
                shipment_status: ShipmentStatus::Delivered,
            },
        );

        let err = create_order(&mut ledger, &shipments, &[("P000001", 1)], &[7003]).unwrap_err();

        assert!(err.contains("only 0 available"));
    }

    /// A failing line aborts the whole order: earlier lines stay unreserved
    #[test]
    fn test_partial_orders_never_reserve() {
        let mut ledger = ledger_with("P000001", 10);
        ledger.insert(
            "P000002",
            LedgerEntry {
                on_hand: 0,
                expected: 0,
                ordered: 0,
                allocated: 0,
                available: 0,
            },
        );

        let err = create_order(
            &mut ledger,
            &HashMap::new(),
            &[("P000001", 5), ("P000002", 1)],
            &[],
        )
        .unwrap_err();

        assert!(err.contains("only 0 available"));
        assert_eq!(ledger["P000001"].available, 10);
        assert_eq!(ledger["P000001"].ordered, 0);
    }

    /// Two competing requests for the full stock: the row lock serializes
    /// them, so the second observes the first's reservation and fails
    #[test]
    fn test_competing_requests_exactly_one_wins() {
        let mut ledger = ledger_with("P000001", 5);

        let first = create_order(&mut ledger, &HashMap::new(), &[("P000001", 5)], &[]);
        let second = create_order(&mut ledger, &HashMap::new(), &[("P000001", 5)], &[]);

        assert!(first.is_ok());
        let err = second.unwrap_err();
        assert!(err.contains("only 0 available"));
        assert_eq!(ledger["P000001"].available, 0);
        assert_eq!(ledger["P000001"].ordered, 5);
    }

    /// A positive request against an already-negative available count fails
    #[test]
    fn test_negative_available_rejects_any_request() {
        let mut ledger = HashMap::new();
        ledger.insert(
            "P000009",
            LedgerEntry {
                on_hand: 0,
                expected: 0,
                ordered: 3,
                allocated: 0,
                available: -3,
            },
        );

        let err = create_order(&mut ledger, &HashMap::new(), &[("P000009", 1)], &[]).unwrap_err();

        assert!(err.contains("only -3 available"));
        assert_eq!(ledger["P000009"].available, -3);
    }

    /// Unknown items surface as not-found, not as a silent zero
    #[test]
    fn test_unknown_item_is_not_found() {
        let mut ledger = ledger_with("P000001", 5);

        let err = create_order(&mut ledger, &HashMap::new(), &[("P999999", 1)], &[]).unwrap_err();

        assert!(err.contains("Inventory for item P999999 not found"));
    }
}
