use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use marketlens_core::{MerchantId, Timestamp};
use marketlens_events::{Event, MarketEvent, Order, Projection, Sale, StockDelta};

use crate::merge::merge_stock_events;

/// Signed stock movement at an instant (`-amount` sale, `+amount` order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryPoint {
    pub timestamp: Timestamp,
    pub delta: StockDelta,
}

/// Stock level right after the movement at `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLevel {
    pub timestamp: Timestamp,
    pub level: StockDelta,
}

/// Chronological stock movements of one merchant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryTimeline {
    points: Vec<InventoryPoint>,
}

impl InventoryTimeline {
    pub fn points(&self) -> &[InventoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Running stock level, one entry per movement.
    ///
    /// The stock held before the first recorded movement is unknown and taken
    /// as zero, so levels can go negative.
    pub fn levels(&self) -> Vec<InventoryLevel> {
        self.points
            .iter()
            .scan(StockDelta::default(), |level, p| {
                *level += p.delta;
                Some(InventoryLevel {
                    timestamp: p.timestamp,
                    level: *level,
                })
            })
            .collect()
    }

    /// Stock level at `ts` (after all movements at or before it).
    pub fn level_at(&self, ts: Timestamp) -> StockDelta {
        self.points
            .iter()
            .take_while(|p| p.timestamp <= ts)
            .map(|p| p.delta)
            .sum()
    }

    /// Stock level after the last movement.
    pub fn final_level(&self) -> StockDelta {
        self.points.iter().map(|p| p.delta).sum()
    }
}

/// Projection: merged sale/order stream → stock movements per merchant.
///
/// Must be fed in chronological order (see `merge_stock_events`). Events that
/// do not move stock (offers, failed sales) are ignored.
#[derive(Debug, Clone, Default)]
pub struct StockLedger {
    timelines: BTreeMap<MerchantId, InventoryTimeline>,
}

impl StockLedger {
    pub fn get(&self, merchant_id: &MerchantId) -> Option<&InventoryTimeline> {
        self.timelines.get(merchant_id)
    }

    pub fn into_timelines(self) -> BTreeMap<MerchantId, InventoryTimeline> {
        self.timelines
    }
}

impl Projection for StockLedger {
    type Ev = MarketEvent;

    fn apply(&mut self, event: &MarketEvent) {
        if let Some(delta) = event.inventory_delta() {
            self.timelines
                .entry(event.merchant_id().clone())
                .or_default()
                .points
                .push(InventoryPoint {
                    timestamp: event.occurred_at(),
                    delta,
                });
        }
    }
}

/// Build per-merchant inventory timelines from sales and orders.
///
/// Merchants without stock movements are absent from the result.
pub fn build_inventory_timelines(sales: &[Sale], orders: &[Order]) -> BTreeMap<MerchantId, InventoryTimeline> {
    merge_stock_events(sales, orders)
        .fold(StockLedger::default(), |mut ledger, event| {
            ledger.apply(&event);
            ledger
        })
        .into_timelines()
}
