use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::costs::error::{CostError, Result};
use crate::costs::logging::LogConfig;
use crate::costs::model::{DEFECTIVE, DatasetKind};

/// File looked up in the working directory to override the built-in defaults.
pub const CONFIG_FILE: &str = "cost-report.json";

/// Whether records flagged as defective take part in the statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefectivePolicy {
    /// Every record counts, whatever its flag.
    #[default]
    Include,
    /// Defective records are dropped before each reduction.
    Exclude,
}

impl DefectivePolicy {
    /// Whether a record with the given flag takes part in the statistics.
    pub fn admits(self, defective: bool) -> bool {
        match self {
            DefectivePolicy::Include => true,
            DefectivePolicy::Exclude => !defective,
        }
    }
}

/// Maps raw header text onto canonical column names before lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNormalization {
    /// Exact raw header -> canonical column name.
    pub aliases: BTreeMap<String, String>,
    /// Canonical names whose raw header may carry trailing whitespace.
    pub trim_trailing: Vec<String>,
}

impl Default for ColumnNormalization {
    fn default() -> Self {
        Self {
            aliases: BTreeMap::new(),
            trim_trailing: vec![DEFECTIVE.to_string()],
        }
    }
}

impl ColumnNormalization {
    /// Returns the canonical name for a raw header. Headers without a rule
    /// are returned untouched.
    pub fn canonical(&self, raw: &str) -> String {
        if let Some(alias) = self.aliases.get(raw) {
            return alias.clone();
        }
        let trimmed = raw.trim_end();
        if trimmed != raw && self.trim_trailing.iter().any(|name| name == trimmed) {
            return trimmed.to_string();
        }
        raw.to_string()
    }
}

/// One dataset to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    pub path: PathBuf,
    pub kind: DatasetKind,
}

impl InputSpec {
    /// Creates an input of the given kind.
    pub fn new(path: impl Into<PathBuf>, kind: DatasetKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Everything a run needs. The defaults are the fixed paths the job has
/// always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub inputs: Vec<InputSpec>,
    pub output: PathBuf,
    pub columns: ColumnNormalization,
    pub defective: DefectivePolicy,
    pub logging: LogConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            inputs: vec![
                InputSpec::new("data/input/PC.csv", DatasetKind::Desktop),
                InputSpec::new("data/input/NB.csv", DatasetKind::Notebook),
            ],
            output: PathBuf::from("data/output/result.xlsx"),
            columns: ColumnNormalization::default(),
            defective: DefectivePolicy::default(),
            logging: LogConfig::default(),
        }
    }
}

impl RunConfig {
    /// Loads `cost-report.json` from `dir` when present, otherwise returns
    /// the defaults.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if path.is_file() {
            Self::from_file(&path)
        } else {
            debug!(path = %path.display(), "no configuration file, using defaults");
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Reads and validates a configuration file. Missing keys take defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&data)?;
        config.validate()?;
        info!(path = %path.display(), inputs = config.inputs.len(), "configuration loaded");
        Ok(config)
    }

    /// Requires at least one input and an output path naming a file.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(CostError::Config("at least one input is required".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(CostError::Config("output path must not be empty".into()));
        }
        if self.output.file_name().is_none() {
            return Err(CostError::Config(format!(
                "output path {} does not name a file",
                self.output.display()
            )));
        }
        Ok(())
    }
}
