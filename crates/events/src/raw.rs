//! Records as emitted by the event producers.
//!
//! Fields the analysis does not need are ignored on deserialization.

use serde::{Deserialize, Serialize};

use marketlens_core::{parse_timestamp, DomainResult, MerchantId};

use crate::market::{HoldingCost, Offer, Order, Sale};
use crate::normalize::Normalize;

/// `buyOffer` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSale {
    pub merchant_id: MerchantId,
    pub amount: i64,
    pub price: f64,
    pub http_code: u16,
    pub timestamp: String,
}

/// `producer` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrder {
    pub merchant_id: MerchantId,
    pub amount: i64,
    pub billing_amount: f64,
    pub timestamp: String,
}

/// `addOffer` / `updateOffer` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOffer {
    pub merchant_id: MerchantId,
    pub price: f64,
    pub timestamp: String,
}

/// `holding_cost` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHoldingCost {
    pub merchant_id: MerchantId,
    pub cost: f64,
}

impl Normalize for RawSale {
    type Output = Sale;

    fn normalize(&self) -> DomainResult<Sale> {
        Ok(Sale {
            merchant_id: self.merchant_id.clone(),
            amount: self.amount,
            price: self.price,
            http_status: self.http_code,
            timestamp: parse_timestamp(&self.timestamp)?,
        })
    }
}

impl Normalize for RawOrder {
    type Output = Order;

    fn normalize(&self) -> DomainResult<Order> {
        Ok(Order {
            merchant_id: self.merchant_id.clone(),
            amount: self.amount,
            billing_amount: self.billing_amount,
            timestamp: parse_timestamp(&self.timestamp)?,
        })
    }
}

impl Normalize for RawOffer {
    type Output = Offer;

    fn normalize(&self) -> DomainResult<Offer> {
        Ok(Offer {
            merchant_id: self.merchant_id.clone(),
            price: self.price,
            timestamp: parse_timestamp(&self.timestamp)?,
        })
    }
}

impl Normalize for RawHoldingCost {
    type Output = HoldingCost;

    fn normalize(&self) -> DomainResult<HoldingCost> {
        Ok(HoldingCost {
            merchant_id: self.merchant_id.clone(),
            cost: self.cost,
        })
    }
}
