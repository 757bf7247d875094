use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use marketlens_accounting::{aggregate_financials, MerchantFinancials, RevenuePolicy};
use marketlens_core::{MerchantId, MerchantRegistry};
use marketlens_events::{normalize_batch, NormalizeError, RawHoldingCost, RawOffer, RawOrder, RawSale};
use marketlens_inventory::{build_inventory_timelines, InventoryTimeline};
use marketlens_pricing::{build_price_timelines, PriceTimeline};

/// Record batches of one run, as read from the producer dump.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub registry: MerchantRegistry,
    pub sales: Vec<RawSale>,
    pub orders: Vec<RawOrder>,
    pub holding_costs: Vec<RawHoldingCost>,
    pub offers_created: Vec<RawOffer>,
    pub offers_updated: Vec<RawOffer>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub revenue_policy: RevenuePolicy,
}

/// Input batch kinds, named after the producer topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Batch {
    Sales,
    Orders,
    HoldingCosts,
    OffersCreated,
    OffersUpdated,
}

impl core::fmt::Display for Batch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Batch::Sales => "buyOffer",
            Batch::Orders => "producer",
            Batch::HoldingCosts => "holding_cost",
            Batch::OffersCreated => "addOffer",
            Batch::OffersUpdated => "updateOffer",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("{batch} batch rejected")]
    Normalize {
        batch: Batch,
        #[source]
        source: NormalizeError,
    },
}

impl AnalysisError {
    fn rejected(batch: Batch) -> impl FnOnce(NormalizeError) -> Self {
        move |source| Self::Normalize { batch, source }
    }
}

/// Report row: one registered merchant with its totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MerchantRow<'a> {
    pub merchant_id: &'a MerchantId,
    pub name: &'a str,
    pub financials: MerchantFinancials,
}

/// Outcome of one run, restricted to registered merchants.
///
/// Every registered merchant has an entry in each mapping; a merchant without
/// events of a kind gets an empty series (or zeroed totals).
#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    registry: MerchantRegistry,
    financials: BTreeMap<MerchantId, MerchantFinancials>,
    inventory: BTreeMap<MerchantId, InventoryTimeline>,
    prices: BTreeMap<MerchantId, PriceTimeline>,
}

impl AnalysisReport {
    pub fn registry(&self) -> &MerchantRegistry {
        &self.registry
    }

    pub fn financials(&self) -> &BTreeMap<MerchantId, MerchantFinancials> {
        &self.financials
    }

    pub fn inventory(&self) -> &BTreeMap<MerchantId, InventoryTimeline> {
        &self.inventory
    }

    pub fn prices(&self) -> &BTreeMap<MerchantId, PriceTimeline> {
        &self.prices
    }

    /// Rows in registry display order (by name, then id).
    pub fn rows(&self) -> Vec<MerchantRow<'_>> {
        self.registry
            .in_display_order()
            .into_iter()
            .map(|(merchant_id, name)| MerchantRow {
                merchant_id,
                name,
                financials: self.financials.get(merchant_id).copied().unwrap_or_default(),
            })
            .collect()
    }
}

/// Run the full analysis over one set of batches.
///
/// Every batch is normalized up front; the first malformed record fails the
/// run. The builders then run independently over the normalized events.
pub fn analyze(input: &AnalysisInput, options: AnalysisOptions) -> Result<AnalysisReport, AnalysisError> {
    let sales = normalize_batch(&input.sales).map_err(AnalysisError::rejected(Batch::Sales))?;
    let orders = normalize_batch(&input.orders).map_err(AnalysisError::rejected(Batch::Orders))?;
    let holding_costs =
        normalize_batch(&input.holding_costs).map_err(AnalysisError::rejected(Batch::HoldingCosts))?;
    let offers_created =
        normalize_batch(&input.offers_created).map_err(AnalysisError::rejected(Batch::OffersCreated))?;
    let offers_updated =
        normalize_batch(&input.offers_updated).map_err(AnalysisError::rejected(Batch::OffersUpdated))?;

    let registry = &input.registry;

    Ok(AnalysisReport {
        registry: registry.clone(),
        financials: aggregate_financials(registry, &sales, &orders, &holding_costs, options.revenue_policy),
        inventory: registry.restrict(build_inventory_timelines(&sales, &orders)),
        prices: registry.restrict(build_price_timelines(&offers_created, &offers_updated)),
    })
}
