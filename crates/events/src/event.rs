use marketlens_core::{MerchantId, Timestamp};

/// A merchant-scoped, timestamped fact.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **attributed** to exactly one merchant
/// - **ordered** by business time (`occurred_at`)
pub trait Event: Clone + core::fmt::Debug {
    /// Merchant the event belongs to.
    fn merchant_id(&self) -> &MerchantId;

    /// When the event occurred.
    fn occurred_at(&self) -> Timestamp;
}
