use crate::costs::model::{CostStats, StatisticsResult};

/// Name of the single worksheet holding the report.
pub const RESULTS_SHEET: &str = "Results";
/// Blank rows left between consecutive sections.
pub const SECTION_GAP: u32 = 1;

pub const MAX_COST_TITLE: &str = "Result1 - Max Cost ISN";
pub const COST_STATS_TITLE: &str = "Result2 - Cost Statistics";
pub const BATTERY_STATS_TITLE: &str = "Result3 - Battery Statistics";

/// A single cell of the report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportValue {
    Text(String),
    Integer(i64),
    /// Already rounded to two decimals.
    Decimal(f64),
}

/// A header row followed by data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<ReportValue>>,
}

impl ReportSection {
    pub fn title(&self) -> &str {
        self.headers.first().map(String::as_str).unwrap_or("")
    }

    /// Header row plus data rows.
    pub fn height(&self) -> u32 {
        1 + self.rows.len() as u32
    }
}

/// Represents the laid-out report, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub sheet_name: String,
    pub sections: Vec<ReportSection>,
}

impl ReportData {
    /// Zero-based first row of every section, in order.
    pub fn section_starts(&self) -> Vec<u32> {
        let mut next = 0;
        self.sections
            .iter()
            .map(|section| {
                let start = next;
                next = start + section.height() + SECTION_GAP;
                start
            })
            .collect()
    }
}

/// Lays out the statistics in their fixed order. Parts missing from the
/// result produce no section at all.
pub fn build_report(result: &StatisticsResult) -> ReportData {
    let mut sections = Vec::new();

    if let Some(entry) = &result.max_cost_entry {
        sections.push(ReportSection {
            headers: vec![MAX_COST_TITLE.to_string(), "Total Cost".to_string()],
            rows: vec![vec![
                ReportValue::Text(entry.isn.clone()),
                ReportValue::Integer(entry.total_cost),
            ]],
        });
    }

    if let Some(stats) = &result.cost_stats {
        sections.push(stats_section(
            COST_STATS_TITLE,
            ["Maximum Cost", "Minimum Cost", "Average Cost"],
            stats,
        ));
    }

    if let Some(stats) = &result.battery_stats {
        sections.push(stats_section(
            BATTERY_STATS_TITLE,
            [
                "Maximum Battery Cost",
                "Minimum Battery Cost",
                "Average Battery Cost",
            ],
            stats,
        ));
    }

    ReportData {
        sheet_name: RESULTS_SHEET.to_string(),
        sections,
    }
}

fn stats_section(title: &str, labels: [&str; 3], stats: &CostStats) -> ReportSection {
    let [max_label, min_label, avg_label] = labels;
    ReportSection {
        headers: vec![title.to_string(), "Values".to_string()],
        rows: vec![
            vec![
                ReportValue::Text(max_label.to_string()),
                ReportValue::Integer(stats.max),
            ],
            vec![
                ReportValue::Text(min_label.to_string()),
                ReportValue::Integer(stats.min),
            ],
            vec![
                ReportValue::Text(avg_label.to_string()),
                ReportValue::Decimal(round_to_cents(stats.average)),
            ],
        ],
    }
}

/// Rounds half away from zero to two decimals, the precision shown in the
/// report.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
