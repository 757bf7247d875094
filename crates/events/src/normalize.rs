//! Batch normalization of raw producer records.

use thiserror::Error;

use marketlens_core::{DomainError, DomainResult};

/// Conversion of a raw record into its normalized form.
pub trait Normalize {
    type Output;

    fn normalize(&self) -> DomainResult<Self::Output>;
}

/// A batch was rejected because one of its records could not be normalized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("record #{index}: {source}")]
pub struct NormalizeError {
    /// Zero-based position of the offending record in its batch.
    pub index: usize,
    #[source]
    pub source: DomainError,
}

/// Normalize a whole batch, preserving record order.
///
/// Fails on the first bad record: a malformed record means upstream data is
/// corrupt, and dropping it would silently skew every derived series.
pub fn normalize_batch<R: Normalize>(records: &[R]) -> Result<Vec<R::Output>, NormalizeError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| record.normalize().map_err(|source| NormalizeError { index, source }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawOffer;
    use marketlens_core::MerchantId;
    use proptest::prelude::*;

    fn offer(ts: &str, price: f64) -> RawOffer {
        RawOffer {
            merchant_id: MerchantId::new("m1").unwrap(),
            price,
            timestamp: ts.to_string(),
        }
    }

    #[test]
    fn preserves_input_order() {
        // Deliberately out of chronological order: normalization must not sort.
        let batch = vec![
            offer("2018-02-01T10:00:05.000Z", 1.0),
            offer("2018-02-01T10:00:01.000Z", 2.0),
            offer("2018-02-01T10:00:03.000Z", 3.0),
        ];
        let prices: Vec<f64> = normalize_batch(&batch).unwrap().iter().map(|o| o.price).collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn malformed_timestamp_fails_whole_batch() {
        let batch = vec![
            offer("2018-02-01T10:00:00.000Z", 1.0),
            offer("01/02/2018 10:00", 2.0),
            offer("2018-02-01T10:00:02.000Z", 3.0),
        ];
        let err = normalize_batch(&batch).unwrap_err();
        assert_eq!(err.index, 1);
        match err.source {
            DomainError::MalformedTimestamp { value, .. } => assert_eq!(value, "01/02/2018 10:00"),
            other => panic!("Expected MalformedTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn empty_batch_is_ok() {
        let batch: Vec<RawOffer> = Vec::new();
        assert!(normalize_batch(&batch).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn output_length_matches_input(secs in prop::collection::vec(0u32..86_400u32, 0..50)) {
            let batch: Vec<RawOffer> = secs
                .iter()
                .map(|s| offer(&format!("2018-02-01T{:02}:{:02}:{:02}.000Z", s / 3600, (s / 60) % 60, s % 60), *s as f64))
                .collect();
            let normalized = normalize_batch(&batch).unwrap();
            prop_assert_eq!(normalized.len(), batch.len());
            for (raw, norm) in batch.iter().zip(&normalized) {
                prop_assert_eq!(raw.price, norm.price);
            }
        }
    }
}
