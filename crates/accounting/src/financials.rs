use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use marketlens_core::{MerchantId, MerchantRegistry};
use marketlens_events::{HoldingCost, Order, Sale};

/// Which sale attempts count towards revenue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenuePolicy {
    /// Only successful sales, matching what the inventory timeline counts.
    #[default]
    SuccessfulOnly,
    /// Every sale attempt regardless of status (legacy report behaviour).
    AllAttempts,
}

impl RevenuePolicy {
    pub fn admits(self, sale: &Sale) -> bool {
        match self {
            RevenuePolicy::SuccessfulOnly => sale.is_successful(),
            RevenuePolicy::AllAttempts => true,
        }
    }
}

/// Totals for one merchant.
///
/// Profit is derived on demand and never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MerchantFinancials {
    pub revenue: f64,
    pub holding_cost: f64,
    pub order_cost: f64,
}

impl MerchantFinancials {
    pub fn profit(&self) -> f64 {
        self.revenue - self.holding_cost - self.order_cost
    }

    fn with_revenue(self, amount: f64) -> Self {
        Self {
            revenue: self.revenue + amount,
            ..self
        }
    }

    fn with_holding_cost(self, amount: f64) -> Self {
        Self {
            holding_cost: self.holding_cost + amount,
            ..self
        }
    }

    fn with_order_cost(self, amount: f64) -> Self {
        Self {
            order_cost: self.order_cost + amount,
            ..self
        }
    }
}

type Ledger = BTreeMap<MerchantId, MerchantFinancials>;

/// Fold one entry into the ledger; merchants outside the registry are skipped.
fn post(
    mut ledger: Ledger,
    merchant_id: &MerchantId,
    update: impl FnOnce(MerchantFinancials) -> MerchantFinancials,
) -> Ledger {
    if let Some(totals) = ledger.get_mut(merchant_id) {
        *totals = update(*totals);
    }
    ledger
}

/// Sum revenue, holding cost and order cost per registered merchant.
///
/// Every registry merchant appears in the result (zeroed if it has no events);
/// events for unregistered merchants are ignored. Sums run in input order.
pub fn aggregate_financials(
    registry: &MerchantRegistry,
    sales: &[Sale],
    orders: &[Order],
    holding_costs: &[HoldingCost],
    policy: RevenuePolicy,
) -> BTreeMap<MerchantId, MerchantFinancials> {
    let opening: Ledger = registry
        .ids()
        .map(|id| (id.clone(), MerchantFinancials::default()))
        .collect();

    let ledger = sales
        .iter()
        .filter(|s| policy.admits(s))
        .fold(opening, |ledger, s| post(ledger, &s.merchant_id, |f| f.with_revenue(s.revenue())));

    let ledger = holding_costs.iter().fold(ledger, |ledger, h| {
        post(ledger, &h.merchant_id, |f| f.with_holding_cost(h.cost))
    });

    orders.iter().fold(ledger, |ledger, o| {
        post(ledger, &o.merchant_id, |f| f.with_order_cost(o.billing_amount))
    })
}
