use cost_report::CostError;
use cost_report::aggregate::{
    aggregate, compute_battery_stats, compute_cost_stats, find_max_cost_entry,
};
use cost_report::config::DefectivePolicy;
use cost_report::model::{CostRecord, Dataset, DatasetKind};

fn desktop(isn: &str, total_cost: i64) -> CostRecord {
    CostRecord {
        product_type: "PC".into(),
        isn: isn.into(),
        defective: false,
        cpu_cost: total_cost / 2,
        network_card_cost: total_cost - total_cost / 2,
        battery_cost: None,
        total_cost,
    }
}

fn notebook(isn: &str, battery_cost: i64, total_cost: i64) -> CostRecord {
    CostRecord {
        product_type: "NB".into(),
        isn: isn.into(),
        defective: false,
        cpu_cost: 0,
        network_card_cost: 0,
        battery_cost: Some(battery_cost),
        total_cost,
    }
}

fn desktop_set(records: Vec<CostRecord>) -> Dataset {
    Dataset::new(DatasetKind::Desktop, "PC.csv", records)
}

fn notebook_set(records: Vec<CostRecord>) -> Dataset {
    Dataset::new(DatasetKind::Notebook, "NB.csv", records)
}

#[test]
fn desktop_cost_statistics_and_max_entry() {
    let pc = desktop_set(vec![
        desktop("PC1", 100),
        desktop("PC2", 250),
        desktop("PC3", 175),
    ]);

    let stats = compute_cost_stats(&[&pc], DefectivePolicy::Include).expect("cost stats");
    assert_eq!(stats.min, 100);
    assert_eq!(stats.max, 250);
    assert_eq!(stats.average, 175.0);

    let entry = find_max_cost_entry(&[&pc], DefectivePolicy::Include).expect("max entry");
    assert_eq!(entry.isn, "PC2");
    assert_eq!(entry.total_cost, 250);
}

#[test]
fn notebook_battery_statistics() {
    let nb = notebook_set(vec![
        notebook("NB1", 20, 400),
        notebook("NB2", 35, 500),
        notebook("NB3", 15, 450),
    ]);

    let stats = compute_battery_stats(&nb, DefectivePolicy::Include).expect("battery stats");
    assert_eq!(stats.min, 15);
    assert_eq!(stats.max, 35);
    assert!((stats.average - 23.333_333).abs() < 1e-4);
}

#[test]
fn battery_statistics_require_the_battery_column() {
    let pc = desktop_set(vec![desktop("PC1", 100)]);

    let error = compute_battery_stats(&pc, DefectivePolicy::Include).expect_err("no column");
    assert!(matches!(
        error,
        CostError::MissingColumn {
            column: "Battery Cost",
            ..
        }
    ));
}

#[test]
fn empty_datasets_fail_every_statistic() {
    let pc = desktop_set(Vec::new());
    let nb = notebook_set(Vec::new());

    assert!(matches!(
        compute_cost_stats(&[&pc], DefectivePolicy::Include),
        Err(CostError::EmptyDataset { .. })
    ));
    assert!(matches!(
        find_max_cost_entry(&[&pc, &nb], DefectivePolicy::Include),
        Err(CostError::EmptyDataset { .. })
    ));
    assert!(matches!(
        compute_battery_stats(&nb, DefectivePolicy::Include),
        Err(CostError::EmptyDataset { .. })
    ));
    assert!(matches!(
        find_max_cost_entry(&[], DefectivePolicy::Include),
        Err(CostError::EmptyDataset { .. })
    ));
}

#[test]
fn equal_maximum_returns_earliest_record() {
    let pc = desktop_set(vec![
        desktop("PC1", 300),
        desktop("PC2", 900),
        desktop("PC3", 900),
    ]);
    let nb = notebook_set(vec![notebook("NB1", 10, 900)]);

    let entry = find_max_cost_entry(&[&pc, &nb], DefectivePolicy::Include).expect("max entry");
    assert_eq!(entry.isn, "PC2");

    let entry = find_max_cost_entry(&[&nb, &pc], DefectivePolicy::Include).expect("max entry");
    assert_eq!(entry.isn, "NB1");
}

#[test]
fn max_entry_is_idempotent() {
    let pc = desktop_set(vec![desktop("PC1", 5), desktop("PC2", 7), desktop("PC3", 7)]);

    let first = find_max_cost_entry(&[&pc], DefectivePolicy::Include).expect("first run");
    let second = find_max_cost_entry(&[&pc], DefectivePolicy::Include).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn average_lies_between_observed_bounds() {
    let samples: Vec<Vec<i64>> = vec![
        vec![42],
        vec![1, 1, 1, 1],
        vec![0, 1_000_000],
        vec![7, 3, 9, 12, 5, 5, 1],
        vec![250, 360, 470, 460, 590, 720],
        (1..=500).map(|v| (v * 37) % 101).collect(),
    ];

    for totals in samples {
        let records = totals
            .iter()
            .enumerate()
            .map(|(idx, total)| desktop(&format!("PC{idx}"), *total))
            .collect();
        let pc = desktop_set(records);

        let stats = compute_cost_stats(&[&pc], DefectivePolicy::Include).expect("cost stats");
        assert!(stats.min as f64 <= stats.average, "{totals:?}");
        assert!(stats.average <= stats.max as f64, "{totals:?}");
        assert!(totals.contains(&stats.min));
        assert!(totals.contains(&stats.max));
    }
}

#[test]
fn defective_records_are_included_by_default() {
    let mut faulty = desktop("PC9", 10_000);
    faulty.defective = true;
    let pc = desktop_set(vec![desktop("PC1", 100), faulty]);

    let entry = find_max_cost_entry(&[&pc], DefectivePolicy::default()).expect("max entry");
    assert_eq!(entry.isn, "PC9");

    let stats = compute_cost_stats(&[&pc], DefectivePolicy::Exclude).expect("cost stats");
    assert_eq!(stats.max, 100);
}

#[test]
fn excluding_every_record_is_an_empty_dataset() {
    let mut faulty = notebook("NB1", 10, 100);
    faulty.defective = true;
    let nb = notebook_set(vec![faulty]);

    assert!(matches!(
        compute_battery_stats(&nb, DefectivePolicy::Exclude),
        Err(CostError::EmptyDataset { .. })
    ));
}

#[test]
fn combined_run_covers_both_datasets() {
    let pc = desktop_set(vec![
        desktop("PC1", 250),
        desktop("PC2", 360),
        desktop("PC3", 470),
    ]);
    let nb = notebook_set(vec![
        notebook("NB1", 100, 460),
        notebook("NB2", 120, 590),
        notebook("NB3", 140, 720),
    ]);

    let result = aggregate(&[&pc, &nb], DefectivePolicy::Include).expect("aggregated");

    let entry = result.max_cost_entry.expect("max entry");
    assert_eq!(entry.isn, "NB3");
    let cost = result.cost_stats.expect("cost stats");
    assert_eq!((cost.min, cost.max), (250, 720));
    assert_eq!(cost.average, 475.0);
    let battery = result.battery_stats.expect("battery stats");
    assert_eq!((battery.min, battery.max), (100, 140));
    assert_eq!(battery.average, 120.0);
}

#[test]
fn desktop_only_run_has_no_battery_statistics() {
    let pc = desktop_set(vec![desktop("PC1", 250)]);

    let result = aggregate(&[&pc], DefectivePolicy::Include).expect("aggregated");

    assert!(result.max_cost_entry.is_some());
    assert!(result.cost_stats.is_some());
    assert!(result.battery_stats.is_none());
}
