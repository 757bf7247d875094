//! Price history reconstruction.
//!
//! Pure domain logic: merges offer-created and offer-updated events into one
//! chronological price series per merchant.

pub mod timeline;

pub use timeline::{build_price_timelines, PriceHistory, PricePoint, PriceTimeline};
