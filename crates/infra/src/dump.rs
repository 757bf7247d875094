//! Loader for the benchmark's topic dump.
//!
//! Layout:
//!
//! ```text
//! <dir>/merchant_id_mapping.json
//! <dir>/kafka/{buyOffer,producer,holding_cost,addOffer,updateOffer}
//! ```
//!
//! Each topic file is a JSON array of records.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use marketlens_analysis::{AnalysisInput, Batch};
use marketlens_core::MerchantRegistry;

use crate::error::{InfraError, InfraResult};

pub const REGISTRY_FILE: &str = "merchant_id_mapping.json";
pub const TOPICS_DIR: &str = "kafka";

/// Paths of one dump directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpLayout {
    root: PathBuf,
}

impl DumpLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILE)
    }

    pub fn topic_path(&self, batch: Batch) -> PathBuf {
        self.root.join(TOPICS_DIR).join(batch.to_string())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> InfraResult<T> {
    let file = File::open(path).map_err(InfraError::io(path))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| InfraError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_topic<T: DeserializeOwned>(layout: &DumpLayout, batch: Batch) -> InfraResult<Vec<T>> {
    let path = layout.topic_path(batch);
    let records: Vec<T> = read_json(&path)?;
    tracing::debug!(topic = %batch, path = %path.display(), records = records.len(), "loaded topic");
    Ok(records)
}

/// Read the merchant registry (`{"<merchant_id>": "<display name>"}`).
pub fn load_registry(layout: &DumpLayout) -> InfraResult<MerchantRegistry> {
    read_json(&layout.registry_path())
}

/// Read every batch of a dump into memory.
pub fn load_dump(dir: impl AsRef<Path>) -> InfraResult<AnalysisInput> {
    let layout = DumpLayout::new(dir.as_ref());

    let input = AnalysisInput {
        registry: load_registry(&layout)?,
        sales: read_topic(&layout, Batch::Sales)?,
        orders: read_topic(&layout, Batch::Orders)?,
        holding_costs: read_topic(&layout, Batch::HoldingCosts)?,
        offers_created: read_topic(&layout, Batch::OffersCreated)?,
        offers_updated: read_topic(&layout, Batch::OffersUpdated)?,
    };

    tracing::info!(
        dir = %dir.as_ref().display(),
        merchants = input.registry.len(),
        sales = input.sales.len(),
        orders = input.orders.len(),
        "dump loaded"
    );

    Ok(input)
}
