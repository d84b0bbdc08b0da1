//! Inventory ledger tests
//!
//! Tests for the stock counters including:
//! - Canonical counter invariant: available = on_hand - allocated - ordered
//! - Reservation arithmetic
//! - Stock receipt arithmetic
//! - Negative available counts as pre-existing data

use proptest::prelude::*;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::integration_helpers::{holds_invariant, receive, reserve, Counters};

    /// A fresh record with stock on hand satisfies the invariant
    #[test]
    fn test_fresh_record_invariant() {
        let counters = Counters::new(100);
        assert!(holds_invariant(&counters));
        assert_eq!(counters.available, 100);
    }

    /// Reserving moves units from available to ordered
    #[test]
    fn test_reserve_arithmetic() {
        let mut counters = Counters::new(10);
        reserve(&mut counters, 4);

        assert_eq!(counters.available, 6);
        assert_eq!(counters.ordered, 4);
        assert_eq!(counters.on_hand, 10);
        assert!(holds_invariant(&counters));
    }

    /// Receiving moves units from expected into on-hand and available
    #[test]
    fn test_receive_arithmetic() {
        let mut counters = Counters::new(5);
        counters.expected = 20;

        receive(&mut counters, 20);

        assert_eq!(counters.on_hand, 25);
        assert_eq!(counters.expected, 0);
        assert_eq!(counters.available, 25);
        assert!(holds_invariant(&counters));
    }

    /// Reserve then receive keeps every counter consistent
    #[test]
    fn test_interleaved_operations() {
        let mut counters = Counters::new(10);
        counters.expected = 15;

        reserve(&mut counters, 10);
        assert_eq!(counters.available, 0);

        receive(&mut counters, 15);
        assert_eq!(counters.available, 15);
        assert_eq!(counters.on_hand, 25);
        assert_eq!(counters.ordered, 10);
        assert!(holds_invariant(&counters));
    }

    /// Allocated stock is excluded from available
    #[test]
    fn test_allocated_reduces_available() {
        let counters = Counters {
            on_hand: 50,
            expected: 0,
            ordered: 10,
            allocated: 15,
            available: 25,
        };
        assert!(holds_invariant(&counters));
    }

    /// Negative available is representable as a pre-existing data fact
    #[test]
    fn test_negative_available_representable() {
        let counters = Counters {
            on_hand: 0,
            expected: 0,
            ordered: 5,
            allocated: 0,
            available: -5,
        };
        assert!(holds_invariant(&counters));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::integration_helpers::{holds_invariant, receive, reserve, Counters};
    use super::*;

    proptest! {
        /// Property: the canonical invariant survives any sequence of
        /// reserve and receive operations
        #[test]
        fn prop_invariant_preserved(
            initial in 0i64..10_000,
            ops in prop::collection::vec((any::<bool>(), 1i64..100), 0..50)
        ) {
            let mut counters = Counters::new(initial);
            counters.expected = 100_000;

            for (is_reserve, amount) in ops {
                if is_reserve {
                    reserve(&mut counters, amount);
                } else {
                    receive(&mut counters, amount);
                }
                prop_assert!(holds_invariant(&counters));
            }
        }

        /// Property: reservations are additive - n reservations of 1 equal
        /// one reservation of n
        #[test]
        fn prop_reservations_additive(initial in 0i64..1_000, n in 1i64..100) {
            let mut one_shot = Counters::new(initial);
            reserve(&mut one_shot, n);

            let mut stepwise = Counters::new(initial);
            for _ in 0..n {
                reserve(&mut stepwise, 1);
            }

            prop_assert_eq!(one_shot.available, stepwise.available);
            prop_assert_eq!(one_shot.ordered, stepwise.ordered);
        }

        /// Property: receiving never changes ordered or allocated
        #[test]
        fn prop_receive_touches_inbound_counters_only(
            initial in 0i64..1_000,
            amount in 1i64..1_000
        ) {
            let mut counters = Counters::new(initial);
            counters.ordered = 7;
            counters.allocated = 3;
            counters.available = initial - 10;
            counters.expected = amount;

            receive(&mut counters, amount);

            prop_assert_eq!(counters.ordered, 7);
            prop_assert_eq!(counters.allocated, 3);
            prop_assert_eq!(counters.expected, 0);
        }
    }
}

// ============================================================================
// Integration Test Helpers (counter simulation)
// ============================================================================

#[cfg(test)]
mod integration_helpers {
    /// In-memory stand-in for an inventory counter row
    #[derive(Debug, Clone)]
    pub struct Counters {
        pub on_hand: i64,
        pub expected: i64,
        pub ordered: i64,
        pub allocated: i64,
        pub available: i64,
    }

    impl Counters {
        /// A record whose entire on-hand stock is uncommitted
        pub fn new(on_hand: i64) -> Self {
            Self {
                on_hand,
                expected: 0,
                ordered: 0,
                allocated: 0,
                available: on_hand,
            }
        }
    }

    /// The canonical relationship every mutation path maintains
    pub fn holds_invariant(c: &Counters) -> bool {
        c.available == c.on_hand - c.allocated - c.ordered
    }

    /// Mirror of the service-side reservation update
    pub fn reserve(c: &mut Counters, amount: i64) {
        c.available -= amount;
        c.ordered += amount;
    }

    /// Mirror of the service-side stock receipt update
    pub fn receive(c: &mut Counters, amount: i64) {
        c.on_hand += amount;
        c.expected -= amount;
        c.available += amount;
    }

    #[test]
    fn test_simulation_matches_invariant() {
        let mut c = Counters::new(12);
        reserve(&mut c, 5);
        receive(&mut c, 3);
        assert!(holds_invariant(&c));
        assert_eq!(c.available, 10);
    }
}
