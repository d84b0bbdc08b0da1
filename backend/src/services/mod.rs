//! Business logic services for the Warehouse Management Platform

pub mod dock;
pub mod inventory;
pub mod item;
pub mod location;
pub mod order;
pub mod shipment;
pub mod supplier;
pub mod transfer;
pub mod warehouse;

pub use dock::DockService;
pub use inventory::InventoryService;
pub use item::ItemService;
pub use location::LocationService;
pub use order::OrderService;
pub use shipment::ShipmentService;
pub use supplier::SupplierService;
pub use transfer::TransferService;
pub use warehouse::WarehouseService;
