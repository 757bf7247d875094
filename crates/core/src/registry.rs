//! Merchant registry: the authoritative list of reported merchants.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::id::MerchantId;

/// Mapping `merchant_id → display name`.
///
/// Every output of an analysis run is restricted to the merchants listed here;
/// events referencing other merchants are dropped without error.
/// Declaration order is kept: it breaks ties between equal display names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerchantRegistry {
    names: BTreeMap<MerchantId, String>,
    declared: Vec<MerchantId>,
}

impl MerchantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a merchant. Renaming keeps its original position.
    pub fn insert(&mut self, id: MerchantId, name: impl Into<String>) {
        if self.names.insert(id.clone(), name.into()).is_none() {
            self.declared.push(id);
        }
    }

    pub fn contains(&self, id: &MerchantId) -> bool {
        self.names.contains_key(id)
    }

    pub fn name(&self, id: &MerchantId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Registered ids in id order.
    pub fn ids(&self) -> impl Iterator<Item = &MerchantId> {
        self.names.keys()
    }

    /// Merchants in report order: by display name, then in declaration order.
    pub fn in_display_order(&self) -> Vec<(&MerchantId, &str)> {
        let mut entries: Vec<_> = self
            .declared
            .iter()
            .filter_map(|id| self.name(id).map(|name| (id, name)))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(b.1));
        entries
    }

    /// Restrict a per-merchant mapping to registered merchants.
    ///
    /// Unregistered keys are dropped; registered merchants missing from `map`
    /// get `T::default()` (an empty sequence, zeroed totals, ...).
    pub fn restrict<T: Default>(&self, mut map: BTreeMap<MerchantId, T>) -> BTreeMap<MerchantId, T> {
        self.ids()
            .map(|id| {
                let value = map.remove(id).unwrap_or_default();
                (id.clone(), value)
            })
            .collect()
    }
}

impl FromIterator<(MerchantId, String)> for MerchantRegistry {
    fn from_iter<I: IntoIterator<Item = (MerchantId, String)>>(iter: I) -> Self {
        let mut registry = Self::default();
        for (id, name) in iter {
            registry.insert(id, name);
        }
        registry
    }
}

struct RegistryVisitor;

impl<'de> Visitor<'de> for RegistryVisitor {
    type Value = MerchantRegistry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of merchant id to display name")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut registry = MerchantRegistry::new();
        while let Some((id, name)) = access.next_entry::<MerchantId, String>()? {
            registry.insert(id, name);
        }
        Ok(registry)
    }
}

/// Reads `{"<merchant_id>": "<display name>", ...}` keeping key order.
impl<'de> Deserialize<'de> for MerchantRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RegistryVisitor)
    }
}
