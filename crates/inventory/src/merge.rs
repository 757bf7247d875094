//! Chronological two-way merge of sales and orders.

use core::iter::Peekable;

use marketlens_events::{MarketEvent, Order, Sale};

/// Iterator interleaving two time-ordered streams into one.
///
/// At each step the earlier event wins; when an order and a sale share a
/// timestamp the order is emitted first. Once one side runs dry the rest of the
/// other is drained in order.
pub struct ChronologicalMerge<'a> {
    sales: Peekable<std::vec::IntoIter<&'a Sale>>,
    orders: Peekable<std::vec::IntoIter<&'a Order>>,
}

impl<'a> ChronologicalMerge<'a> {
    /// Merge two streams that are each already sorted by timestamp.
    ///
    /// Unsorted input is not detected; the output is then well-formed but not
    /// chronological.
    pub fn presorted(sales: Vec<&'a Sale>, orders: Vec<&'a Order>) -> Self {
        Self {
            sales: sales.into_iter().peekable(),
            orders: orders.into_iter().peekable(),
        }
    }
}

impl Iterator for ChronologicalMerge<'_> {
    type Item = MarketEvent;

    fn next(&mut self) -> Option<MarketEvent> {
        let take_order = match (self.orders.peek(), self.sales.peek()) {
            (Some(order), Some(sale)) => order.timestamp <= sale.timestamp,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return None,
        };

        if take_order {
            self.orders.next().map(|o| MarketEvent::Order(o.clone()))
        } else {
            self.sales.next().map(|s| MarketEvent::Sale(s.clone()))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.sales.len() + self.orders.len();
        (n, Some(n))
    }
}

/// Merge successful sales and all orders into one chronological stream.
///
/// Failed sale attempts are dropped. Each kind is stable-sorted by timestamp
/// first, which leaves already-ordered producer output unchanged.
pub fn merge_stock_events<'a>(sales: &'a [Sale], orders: &'a [Order]) -> ChronologicalMerge<'a> {
    let mut sales: Vec<&Sale> = sales.iter().filter(|s| s.is_successful()).collect();
    let mut orders: Vec<&Order> = orders.iter().collect();
    sales.sort_by_key(|s| s.timestamp);
    orders.sort_by_key(|o| o.timestamp);
    ChronologicalMerge::presorted(sales, orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use marketlens_core::{MerchantId, Timestamp};
    use marketlens_events::{Event, StockDelta, HTTP_OK};
    use proptest::prelude::*;

    fn t(secs: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2018, 2, 1, 10, 0, 0).unwrap() + Duration::seconds(secs)
    }

    fn sale(secs: i64, amount: i64, status: u16) -> Sale {
        Sale {
            merchant_id: MerchantId::new("m1").unwrap(),
            amount,
            price: 1.0,
            http_status: status,
            timestamp: t(secs),
        }
    }

    fn order(secs: i64, amount: i64) -> Order {
        Order {
            merchant_id: MerchantId::new("m1").unwrap(),
            amount,
            billing_amount: 1.0,
            timestamp: t(secs),
        }
    }

    fn deltas(merge: ChronologicalMerge<'_>) -> Vec<(Timestamp, StockDelta)> {
        merge
            .map(|e| (e.occurred_at(), e.inventory_delta().unwrap()))
            .collect()
    }

    #[test]
    fn interleaves_by_timestamp() {
        let sales = [sale(2, 1, HTTP_OK), sale(4, 2, HTTP_OK)];
        let orders = [order(1, 10), order(3, 5)];
        assert_eq!(
            deltas(merge_stock_events(&sales, &orders)),
            vec![(t(1), 10), (t(2), -1), (t(3), 5), (t(4), -2)]
        );
    }

    #[test]
    fn order_wins_timestamp_tie() {
        let sales = [sale(5, 1, HTTP_OK)];
        let orders = [order(5, 3)];
        let merged: Vec<_> = merge_stock_events(&sales, &orders).collect();
        assert!(matches!(merged[0], MarketEvent::Order(_)));
        assert!(matches!(merged[1], MarketEvent::Sale(_)));
    }

    #[test]
    fn drains_remaining_orders_after_sales_run_out() {
        let sales = [sale(1, 1, HTTP_OK)];
        let orders = [order(0, 5), order(2, 5), order(3, 5)];
        assert_eq!(
            deltas(merge_stock_events(&sales, &orders)),
            vec![(t(0), 5), (t(1), -1), (t(2), 5), (t(3), 5)]
        );
    }

    #[test]
    fn drains_remaining_sales_after_orders_run_out() {
        let sales = [sale(1, 1, HTTP_OK), sale(2, 1, HTTP_OK)];
        let orders = [order(0, 5)];
        assert_eq!(merge_stock_events(&sales, &orders).count(), 3);
    }

    #[test]
    fn one_side_empty() {
        let sales = [sale(1, 1, HTTP_OK), sale(2, 2, HTTP_OK)];
        assert_eq!(deltas(merge_stock_events(&sales, &[])), vec![(t(1), -1), (t(2), -2)]);
        let orders = [order(1, 4)];
        assert_eq!(deltas(merge_stock_events(&[], &orders)), vec![(t(1), 4)]);
        assert_eq!(merge_stock_events(&[], &[]).count(), 0);
    }

    #[test]
    fn failed_sales_are_dropped() {
        let sales = [sale(1, 1, 410), sale(2, 2, HTTP_OK), sale(3, 3, 500)];
        assert_eq!(deltas(merge_stock_events(&sales, &[])), vec![(t(2), -2)]);
    }

    #[test]
    fn unsorted_input_is_sorted_before_merging() {
        let sales = [sale(4, 1, HTTP_OK), sale(2, 1, HTTP_OK)];
        let orders = [order(3, 1), order(1, 1)];
        let times: Vec<_> = merge_stock_events(&sales, &orders).map(|e| e.occurred_at()).collect();
        assert_eq!(times, vec![t(1), t(2), t(3), t(4)]);
    }

    #[test]
    fn presorted_merge_trusts_input_order() {
        let late = sale(9, 1, HTTP_OK);
        let early = sale(1, 1, HTTP_OK);
        let times: Vec<_> = ChronologicalMerge::presorted(vec![&late, &early], vec![])
            .map(|e| e.occurred_at())
            .collect();
        assert_eq!(times, vec![t(9), t(1)]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the merged stream is chronological, orders precede sales
        /// on ties, and nothing but failed sales is lost.
        #[test]
        fn merged_stream_is_chronological(
            sale_rows in prop::collection::vec((0i64..50, 1i64..10, prop::bool::ANY), 0..30),
            order_rows in prop::collection::vec((0i64..50, 1i64..10), 0..30),
        ) {
            let sales: Vec<Sale> = sale_rows
                .iter()
                .map(|(s, a, ok)| sale(*s, *a, if *ok { HTTP_OK } else { 503 }))
                .collect();
            let orders: Vec<Order> = order_rows.iter().map(|(s, a)| order(*s, *a)).collect();

            let merged: Vec<MarketEvent> = merge_stock_events(&sales, &orders).collect();

            let successful = sales.iter().filter(|s| s.is_successful()).count();
            prop_assert_eq!(merged.len(), successful + orders.len());

            for pair in merged.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.occurred_at() <= b.occurred_at());
                if a.occurred_at() == b.occurred_at() {
                    prop_assert!(
                        !(matches!(a, MarketEvent::Sale(_)) && matches!(b, MarketEvent::Order(_))),
                        "sale emitted before order at the same instant"
                    );
                }
            }
        }
    }
}
