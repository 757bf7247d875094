use serde::{Deserialize, Serialize};

use marketlens_core::{MerchantId, Timestamp};

use crate::Event;

/// Status code of a sale attempt that went through.
pub const HTTP_OK: u16 = 200;

/// A buy attempt against a merchant's offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub merchant_id: MerchantId,
    pub amount: i64,
    pub price: f64,
    pub http_status: u16,
    pub timestamp: Timestamp,
}

impl Sale {
    /// Failed attempts do not move stock.
    pub fn is_successful(&self) -> bool {
        self.http_status == HTTP_OK
    }

    pub fn revenue(&self) -> f64 {
        self.amount as f64 * self.price
    }
}

/// A merchant's replenishment purchase from the producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub merchant_id: MerchantId,
    pub amount: i64,
    pub billing_amount: f64,
    pub timestamp: Timestamp,
}

/// A published (or re-published) price for a merchant's offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub merchant_id: MerchantId,
    pub price: f64,
    pub timestamp: Timestamp,
}

/// Storage cost charged to a merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingCost {
    pub merchant_id: MerchantId,
    pub cost: f64,
}

/// Signed stock movement. Wider than `amount` so negation and running sums
/// of any `i64` amounts cannot overflow.
pub type StockDelta = i128;

/// Normalized market event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarketEvent {
    Sale(Sale),
    Order(Order),
    OfferCreated(Offer),
    OfferUpdated(Offer),
}

impl MarketEvent {
    /// Signed stock movement: `-amount` for a successful sale, `+amount` for
    /// an order, `None` for events that do not touch stock.
    pub fn inventory_delta(&self) -> Option<StockDelta> {
        match self {
            MarketEvent::Sale(s) if s.is_successful() => Some(-StockDelta::from(s.amount)),
            MarketEvent::Order(o) => Some(StockDelta::from(o.amount)),
            _ => None,
        }
    }

    /// Price published by an offer event.
    pub fn offered_price(&self) -> Option<f64> {
        match self {
            MarketEvent::OfferCreated(o) | MarketEvent::OfferUpdated(o) => Some(o.price),
            _ => None,
        }
    }
}

impl Event for MarketEvent {
    fn merchant_id(&self) -> &MerchantId {
        match self {
            MarketEvent::Sale(e) => &e.merchant_id,
            MarketEvent::Order(e) => &e.merchant_id,
            MarketEvent::OfferCreated(e) | MarketEvent::OfferUpdated(e) => &e.merchant_id,
        }
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            MarketEvent::Sale(e) => e.timestamp,
            MarketEvent::Order(e) => e.timestamp,
            MarketEvent::OfferCreated(e) | MarketEvent::OfferUpdated(e) => e.timestamp,
        }
    }
}
