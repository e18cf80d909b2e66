use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Category label column.
pub const PRODUCT_TYPE: &str = "Product Type";
/// Unit identifier column.
pub const ISN: &str = "ISN";
/// Faulty-unit flag column. Source files often pad this header.
pub const DEFECTIVE: &str = "Defective";
/// CPU cost column.
pub const CPU_COST: &str = "CPU Cost";
/// Network card cost column.
pub const NETWORK_CARD_COST: &str = "Network Card Cost";
/// Battery cost column, notebook inputs only.
pub const BATTERY_COST: &str = "Battery Cost";
/// Aggregate cost column used for the maximum entry and cost statistics.
pub const TOTAL_COST: &str = "Total Cost";

const DESKTOP_COLUMNS: &[&str] = &[
    PRODUCT_TYPE,
    ISN,
    DEFECTIVE,
    CPU_COST,
    NETWORK_CARD_COST,
    TOTAL_COST,
];

const NOTEBOOK_COLUMNS: &[&str] = &[
    PRODUCT_TYPE,
    ISN,
    DEFECTIVE,
    CPU_COST,
    NETWORK_CARD_COST,
    BATTERY_COST,
    TOTAL_COST,
];

/// Which product line a dataset describes. The kind fixes the column set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Desktop computers (`PC.csv`).
    Desktop,
    /// Notebook computers (`NB.csv`), which also carry a battery cost.
    Notebook,
}

impl DatasetKind {
    /// Canonical column names every input of this kind must provide.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::Desktop => DESKTOP_COLUMNS,
            DatasetKind::Notebook => NOTEBOOK_COLUMNS,
        }
    }

    /// Whether the schema includes the `Battery Cost` column.
    pub fn has_battery_cost(self) -> bool {
        matches!(self, DatasetKind::Notebook)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Desktop => write!(f, "desktop"),
            DatasetKind::Notebook => write!(f, "notebook"),
        }
    }
}

/// One row of input data: the cost breakdown of a single physical unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRecord {
    pub product_type: String,
    /// Unique identifier of the unit within its dataset.
    pub isn: String,
    pub defective: bool,
    pub cpu_cost: i64,
    pub network_card_cost: i64,
    /// Present on notebook records only.
    pub battery_cost: Option<i64>,
    pub total_cost: i64,
}

/// An ordered, immutable collection of records sharing one schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub kind: DatasetKind,
    /// File the records were loaded from.
    pub source: PathBuf,
    pub records: Vec<CostRecord>,
}

impl Dataset {
    /// Creates a dataset of the given kind loaded from `source`.
    pub fn new(kind: DatasetKind, source: impl Into<PathBuf>, records: Vec<CostRecord>) -> Self {
        Self {
            kind,
            source: source.into(),
            records,
        }
    }

    /// Whether the dataset's schema includes the `Battery Cost` column.
    pub fn has_battery_cost(&self) -> bool {
        self.kind.has_battery_cost()
    }

    /// Number of records, defective ones included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Identifier and value of the record with the largest total cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxCostEntry {
    pub isn: String,
    pub total_cost: i64,
}

/// Minimum, maximum and mean of one cost column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostStats {
    pub min: i64,
    pub max: i64,
    pub average: f64,
}

/// Everything the report writer renders. Absent parts produce no section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub max_cost_entry: Option<MaxCostEntry>,
    pub cost_stats: Option<CostStats>,
    pub battery_stats: Option<CostStats>,
}
