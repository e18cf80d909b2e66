use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info, instrument};

use crate::costs::aggregate::aggregate;
use crate::costs::config::RunConfig;
use crate::costs::error::Result;
use crate::costs::io::{self, excel_write};
use crate::costs::logging::{self, LogConfig};
use crate::costs::model::{Dataset, StatisticsResult};
use crate::costs::report::build_report;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub output: PathBuf,
    /// Record count per input, in load order.
    pub records: Vec<usize>,
    pub sections: usize,
    pub statistics: StatisticsResult,
}

/// Loads every input, aggregates and writes the report. The first error
/// aborts the run before anything is written.
#[instrument(
    level = "info",
    skip_all,
    fields(inputs = config.inputs.len(), output = %config.output.display())
)]
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;

    info!("loading input files");
    let datasets = config
        .inputs
        .iter()
        .map(|input| io::load_dataset(&input.path, input.kind, &config.columns))
        .collect::<Result<Vec<Dataset>>>()?;

    info!("processing data");
    let views: Vec<&Dataset> = datasets.iter().collect();
    let statistics = aggregate(&views, config.defective)?;

    info!("writing results");
    let report = build_report(&statistics);
    debug!(sections = report.sections.len(), "report laid out");
    excel_write::write_report(&config.output, &report)?;

    info!(output = %config.output.display(), "cost report completed");
    Ok(RunSummary {
        output: config.output.clone(),
        records: datasets.iter().map(Dataset::len).collect(),
        sections: report.sections.len(),
        statistics,
    })
}

/// Entry point used by the binary. Configuration discovery in `dir` is
/// logged through a default dispatcher; the run itself uses the dispatcher
/// built from the discovered [`LogConfig`].
pub fn execute(dir: &Path) -> Result<RunSummary> {
    let bootstrap = logging::build_dispatch(&LogConfig::default())?;
    let config = tracing::dispatcher::with_default(&bootstrap, || {
        RunConfig::discover(dir).inspect_err(|err| {
            error!(dir = %dir.display(), error = %err, "configuration rejected");
        })
    })?;

    let dispatch = logging::build_dispatch(&config.logging)?;
    tracing::dispatcher::with_default(&dispatch, || {
        run(&config).inspect_err(|err| {
            error!(error = %err, "cost report failed");
        })
    })
}
