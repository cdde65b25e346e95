mod common;

use pestwatch::config::StatsOptions;
use pestwatch::report::Report;
use pestwatch::stats::{aggregate, aggregate_with, CategoryRollup, Statistics};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashMap};

fn report(id: &str, submitter: Option<&str>, labels: &[&str]) -> Report {
    let report = Report::new(id, labels.iter().map(|l| l.to_string()).collect());
    match submitter {
        Some(user) => report.with_submitter(user, None),
        None => report,
    }
}

/// Rollup totals keyed by id, ignoring output order.
fn totals(stats: &Statistics) -> (HashMap<String, (usize, BTreeMap<String, usize>)>, HashMap<String, usize>) {
    let users = stats
        .by_user
        .iter()
        .map(|u| (u.user_id.clone(), (u.total_reports, u.categories.clone())))
        .collect();
    let categories = stats.by_category.iter().map(|c| (c.label.clone(), c.count)).collect();
    (users, categories)
}

#[test]
fn test_dashboard_example() {
    let reports = vec![
        report("1", Some("u1"), &["Dengue"]),
        report("2", Some("u1"), &["Zica"]),
        report("3", None, &["Dengue"]),
    ];
    let stats = aggregate(&reports);

    let u1 = stats.user("u1").unwrap();
    assert_eq!(u1.total_reports, 2);
    let expected: BTreeMap<String, usize> = [("Dengue".to_string(), 1), ("Zica".to_string(), 1)].into_iter().collect();
    assert_eq!(u1.categories, expected);
    assert_eq!(
        stats.by_category,
        vec![
            CategoryRollup { label: "Dengue".to_string(), count: 2 },
            CategoryRollup { label: "Zica".to_string(), count: 1 },
        ]
    );
}

#[test]
fn test_order_independence() {
    let reports = common::random_reports(3, 250);
    let baseline = totals(&aggregate(&reports));

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        let mut shuffled = reports.clone();
        shuffled.shuffle(&mut rng);
        assert_eq!(totals(&aggregate(&shuffled)), baseline);
    }
}

#[test]
fn test_category_mentions_cover_reports() {
    for seed in 0..10 {
        let reports = common::random_reports(seed, 150);
        let stats = aggregate(&reports);
        assert!(stats.total_category_mentions() >= reports.len());

        let single: Vec<_> = reports.into_iter().filter(|r| r.category_labels.len() == 1).collect();
        assert_eq!(aggregate(&single).total_category_mentions(), single.len());
    }
}

#[test]
fn test_user_totals_match_attributed_reports() {
    let reports = common::random_reports(11, 300);
    let stats = aggregate(&reports);

    let attributed = reports.iter().filter(|r| r.submitter_id.is_some()).count();
    let summed: usize = stats.by_user.iter().map(|u| u.total_reports).sum();
    assert_eq!(summed, attributed);
}

#[test]
fn test_fallback_label_from_config() {
    let options = StatsOptions {
        fallback_user_label: "Usuario ID {id}".to_string(),
    };
    let stats = aggregate_with(&[report("1", Some("5"), &["Zica"])], &options);
    assert_eq!(stats.user("5").unwrap().display_name, "Usuario ID 5");
}

#[test]
fn test_statistics_serialize_for_charts() {
    let stats = aggregate(&[report("1", Some("u1"), &["Dengue"])]);
    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["byCategory"][0]["label"], "Dengue");
    assert_eq!(value["byUser"][0]["totalReports"], 1);
    assert_eq!(value["byUser"][0]["categories"]["Dengue"], 1);
}
