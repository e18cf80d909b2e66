//! Reductions over loaded datasets. Everything here is pure: no I/O and no
//! mutation of the inputs.

use tracing::{debug, instrument};

use crate::costs::config::DefectivePolicy;
use crate::costs::error::{CostError, Result};
use crate::costs::model::{
    BATTERY_COST, CostRecord, CostStats, Dataset, MaxCostEntry, StatisticsResult,
};

const MAX_COST_ENTRY: &str = "maximum cost entry";
const COST_STATISTICS: &str = "cost statistics";
const BATTERY_STATISTICS: &str = "battery statistics";

fn in_scope<'a>(
    datasets: &'a [&'a Dataset],
    policy: DefectivePolicy,
) -> impl Iterator<Item = &'a CostRecord> + 'a {
    datasets
        .iter()
        .flat_map(|dataset| dataset.records.iter())
        .filter(move |record| policy.admits(record.defective))
}

/// Returns the record with the greatest total cost across all datasets, in
/// input order. On ties the first record encountered wins.
pub fn find_max_cost_entry(
    datasets: &[&Dataset],
    policy: DefectivePolicy,
) -> Result<MaxCostEntry> {
    let mut best: Option<&CostRecord> = None;
    for record in in_scope(datasets, policy) {
        match best {
            Some(current) if record.total_cost <= current.total_cost => {}
            _ => best = Some(record),
        }
    }

    best.map(|record| MaxCostEntry {
        isn: record.isn.clone(),
        total_cost: record.total_cost,
    })
    .ok_or(CostError::EmptyDataset {
        statistic: MAX_COST_ENTRY,
    })
}

/// Min, max and mean of `total_cost` over every in-scope record.
pub fn compute_cost_stats(datasets: &[&Dataset], policy: DefectivePolicy) -> Result<CostStats> {
    summarize(
        in_scope(datasets, policy).map(|record| record.total_cost),
        COST_STATISTICS,
    )
}

/// Min, max and mean of `battery_cost`. Only defined for schemas that carry
/// the column.
pub fn compute_battery_stats(dataset: &Dataset, policy: DefectivePolicy) -> Result<CostStats> {
    battery_stats_over(&[dataset], policy)
}

fn battery_stats_over(datasets: &[&Dataset], policy: DefectivePolicy) -> Result<CostStats> {
    if let Some(dataset) = datasets.iter().find(|dataset| !dataset.has_battery_cost()) {
        debug!(
            source = %dataset.source.display(),
            kind = %dataset.kind,
            "dataset has no battery column"
        );
        return Err(CostError::MissingColumn {
            column: BATTERY_COST,
            statistic: BATTERY_STATISTICS,
        });
    }

    let mut values = Vec::new();
    for record in in_scope(datasets, policy) {
        let value = record.battery_cost.ok_or(CostError::MissingColumn {
            column: BATTERY_COST,
            statistic: BATTERY_STATISTICS,
        })?;
        values.push(value);
    }
    summarize(values, BATTERY_STATISTICS)
}

fn summarize(values: impl IntoIterator<Item = i64>, statistic: &'static str) -> Result<CostStats> {
    let mut count: u64 = 0;
    let mut sum: i128 = 0;
    let mut bounds: Option<(i64, i64)> = None;

    for value in values {
        count += 1;
        sum += i128::from(value);
        bounds = Some(match bounds {
            Some((min, max)) => (min.min(value), max.max(value)),
            None => (value, value),
        });
    }

    let (min, max) = bounds.ok_or(CostError::EmptyDataset { statistic })?;
    Ok(CostStats {
        min,
        max,
        average: sum as f64 / count as f64,
    })
}

/// Computes every statistic the report shows. Battery statistics cover the
/// datasets whose schema has a battery column and are absent when none does.
#[instrument(level = "info", skip_all, fields(datasets = datasets.len(), policy = ?policy))]
pub fn aggregate(datasets: &[&Dataset], policy: DefectivePolicy) -> Result<StatisticsResult> {
    let max_cost_entry = find_max_cost_entry(datasets, policy)?;
    let cost_stats = compute_cost_stats(datasets, policy)?;

    let notebooks: Vec<&Dataset> = datasets
        .iter()
        .copied()
        .filter(|dataset| dataset.has_battery_cost())
        .collect();
    let battery_stats = if notebooks.is_empty() {
        None
    } else {
        Some(battery_stats_over(&notebooks, policy)?)
    };

    debug!(
        isn = %max_cost_entry.isn,
        total_cost = max_cost_entry.total_cost,
        has_battery = battery_stats.is_some(),
        "statistics computed"
    );

    Ok(StatisticsResult {
        max_cost_entry: Some(max_cost_entry),
        cost_stats: Some(cost_stats),
        battery_stats,
    })
}
