//! Merchant identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Opaque merchant identifier.
///
/// Upstream producers emit merchant ids either as JSON strings or as integers;
/// both are normalized to their string form so `"7"` and `7` name the same
/// merchant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "IdRepr", into = "String")]
pub struct MerchantId(String);

/// Wire representations accepted for a merchant id.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Integer(i64),
}

impl MerchantId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid_id("merchant id cannot be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for MerchantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MerchantId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<IdRepr> for MerchantId {
    type Error = DomainError;

    fn try_from(value: IdRepr) -> Result<Self, Self::Error> {
        match value {
            IdRepr::Text(s) => Self::new(s),
            IdRepr::Integer(n) => Self::new(n.to_string()),
        }
    }
}

impl From<MerchantId> for String {
    fn from(value: MerchantId) -> Self {
        value.0
    }
}
