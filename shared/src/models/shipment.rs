//! Shipment status, direction, and order-link rules

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shipment status in the carrier lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentStatus {
    Pending,
    Transit,
    Delivered,
}

impl ShipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Pending",
            ShipmentStatus::Transit => "Transit",
            ShipmentStatus::Delivered => "Delivered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(ShipmentStatus::Pending),
            "Transit" => Some(ShipmentStatus::Transit),
            "Delivered" => Some(ShipmentStatus::Delivered),
            _ => None,
        }
    }
}

/// Shipment direction: "I" for stock arriving into a warehouse, "O" for
/// stock going out to a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentType {
    #[serde(rename = "I")]
    Incoming,
    #[serde(rename = "O")]
    Outgoing,
}

impl ShipmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentType::Incoming => "I",
            ShipmentType::Outgoing => "O",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "I" => Some(ShipmentType::Incoming),
            "O" => Some(ShipmentType::Outgoing),
            _ => None,
        }
    }
}

/// Rejected order-to-shipment link
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("cannot link order with an incoming shipment")]
    IncomingShipment,
    #[error("cannot link order with Delivered shipment")]
    DeliveredShipment,
}

/// Decide whether an order may reference a shipment.
///
/// The direction check runs before the status check; the first violation is
/// the one reported.
pub fn validate_order_link(
    shipment_type: ShipmentType,
    shipment_status: ShipmentStatus,
) -> Result<(), LinkError> {
    if shipment_type == ShipmentType::Incoming {
        return Err(LinkError::IncomingShipment);
    }
    if shipment_status == ShipmentStatus::Delivered {
        return Err(LinkError::DeliveredShipment);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_codes_round_trip() {
        assert_eq!(ShipmentType::from_str("I"), Some(ShipmentType::Incoming));
        assert_eq!(ShipmentType::from_str("O"), Some(ShipmentType::Outgoing));
        assert_eq!(ShipmentType::from_str("X"), None);
        assert_eq!(ShipmentType::Incoming.as_str(), "I");
        assert_eq!(ShipmentType::Outgoing.as_str(), "O");
    }

    #[test]
    fn outgoing_pending_shipment_is_linkable() {
        assert_eq!(
            validate_order_link(ShipmentType::Outgoing, ShipmentStatus::Pending),
            Ok(())
        );
        assert_eq!(
            validate_order_link(ShipmentType::Outgoing, ShipmentStatus::Transit),
            Ok(())
        );
    }

    #[test]
    fn incoming_shipment_is_rejected() {
        let err = validate_order_link(ShipmentType::Incoming, ShipmentStatus::Pending)
            .unwrap_err();
        assert_eq!(err, LinkError::IncomingShipment);
        assert!(err
            .to_string()
            .contains("cannot link order with an incoming shipment"));
    }

    #[test]
    fn delivered_shipment_is_rejected() {
        let err = validate_order_link(ShipmentType::Outgoing, ShipmentStatus::Delivered)
            .unwrap_err();
        assert_eq!(err, LinkError::DeliveredShipment);
        assert!(err
            .to_string()
            .contains("cannot link order with Delivered shipment"));
    }

    #[test]
    fn incoming_check_runs_before_delivered_check() {
        // A shipment that violates both rules reports the direction first.
        let err = validate_order_link(ShipmentType::Incoming, ShipmentStatus::Delivered)
            .unwrap_err();
        assert_eq!(err, LinkError::IncomingShipment);
    }
}
