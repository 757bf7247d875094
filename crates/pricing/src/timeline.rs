use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use marketlens_core::{MerchantId, Timestamp};
use marketlens_events::{Event, MarketEvent, Offer, Projection};

/// Price published at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: Timestamp,
    pub price: f64,
}

/// Chronological price series of one merchant.
///
/// Points are non-decreasing in timestamp. A merchant is assumed to have at
/// most one active offer at a time; if that does not hold the series is still
/// chronological, with same-instant points kept in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTimeline {
    points: Vec<PricePoint>,
}

impl PriceTimeline {
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Price in effect at `ts`: the last point at or before it.
    ///
    /// `None` before the merchant's first offer.
    pub fn price_at(&self, ts: Timestamp) -> Option<f64> {
        let idx = self.points.partition_point(|p| p.timestamp <= ts);
        idx.checked_sub(1).map(|i| self.points[i].price)
    }

    /// Most recent price.
    pub fn latest(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }
}

/// Projection: offer events → price timeline per merchant.
///
/// Expects events in chronological order; non-offer events are ignored.
#[derive(Debug, Clone, Default)]
pub struct PriceHistory {
    timelines: BTreeMap<MerchantId, PriceTimeline>,
}

impl PriceHistory {
    pub fn get(&self, merchant_id: &MerchantId) -> Option<&PriceTimeline> {
        self.timelines.get(merchant_id)
    }

    pub fn into_timelines(self) -> BTreeMap<MerchantId, PriceTimeline> {
        self.timelines
    }
}

impl Projection for PriceHistory {
    type Ev = MarketEvent;

    fn apply(&mut self, event: &MarketEvent) {
        if let Some(price) = event.offered_price() {
            self.timelines
                .entry(event.merchant_id().clone())
                .or_default()
                .points
                .push(PricePoint {
                    timestamp: event.occurred_at(),
                    price,
                });
        }
    }
}

/// Build per-merchant price timelines from created and updated offers.
///
/// Both batches are concatenated (created first) and stable-sorted by
/// timestamp, so a creation and an update at the same instant keep that order.
/// Merchants without offers are absent from the result.
pub fn build_price_timelines(created: &[Offer], updated: &[Offer]) -> BTreeMap<MerchantId, PriceTimeline> {
    let mut offers: Vec<MarketEvent> = created
        .iter()
        .cloned()
        .map(MarketEvent::OfferCreated)
        .chain(updated.iter().cloned().map(MarketEvent::OfferUpdated))
        .collect();

    // `sort_by_key` is stable.
    offers.sort_by_key(|e| e.occurred_at());

    PriceHistory::replay(&offers).into_timelines()
}
