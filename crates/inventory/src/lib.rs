//! Inventory progression reconstruction.
//!
//! This crate rebuilds stock levels over time from sale and order events,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod merge;
pub mod timeline;

pub use merge::{merge_stock_events, ChronologicalMerge};
pub use timeline::{
    build_inventory_timelines, InventoryLevel, InventoryPoint, InventoryTimeline, StockLedger,
};
