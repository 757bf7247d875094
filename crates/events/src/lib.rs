//! Market events: raw producer records and their normalized form.
//!
//! Normalization is pure: it parses timestamps and merchant ids, preserves
//! record order, and rejects a whole batch on the first malformed record.

pub mod event;
pub mod market;
pub mod normalize;
pub mod projection;
pub mod raw;

pub use event::Event;
pub use market::{HoldingCost, MarketEvent, Offer, Order, Sale, StockDelta, HTTP_OK};
pub use normalize::{normalize_batch, Normalize, NormalizeError};
pub use projection::Projection;
pub use raw::{RawHoldingCost, RawOffer, RawOrder, RawSale};
