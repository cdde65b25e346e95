//! Aggregation Engine
//!
//! Folds a report snapshot into the two dashboard rollups in one pass:
//! reports per submitter (with a per-category breakdown) and reports per
//! category. A report naming several categories counts once in each.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::config::StatsOptions;
use crate::report::Report;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRollup {
    pub user_id: String,
    pub display_name: String,
    pub total_reports: usize,
    /// Category label -> number of this user's reports naming it.
    pub categories: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRollup {
    pub label: String,
    pub count: usize,
}

/// Both rollups of one snapshot, each in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub by_user: Vec<UserRollup>,
    pub by_category: Vec<CategoryRollup>,
}

impl Statistics {
    pub fn user(&self, user_id: &str) -> Option<&UserRollup> {
        self.by_user.iter().find(|u| u.user_id == user_id)
    }

    pub fn category_count(&self, label: &str) -> usize {
        self.by_category
            .iter()
            .find(|c| c.label == label)
            .map_or(0, |c| c.count)
    }

    /// Sum of all category counts. At least the number of categorised
    /// reports, more when reports name several categories.
    pub fn total_category_mentions(&self) -> usize {
        self.by_category.iter().map(|c| c.count).sum()
    }
}

/// Aggregates with the default fallback display name.
pub fn aggregate(reports: &[Report]) -> Statistics {
    aggregate_with(reports, &StatsOptions::default())
}

pub fn aggregate_with(reports: &[Report], options: &StatsOptions) -> Statistics {
    let mut fold = RollupFold::new(options);
    for report in reports {
        fold.visit(report);
    }
    let stats = fold.finish();
    debug!(
        "Aggregated {} reports into {} user and {} category rollups",
        reports.len(),
        stats.by_user.len(),
        stats.by_category.len()
    );
    stats
}

/// Accumulator behind [`aggregate_with`].
struct RollupFold<'o> {
    options: &'o StatsOptions,
    users: Vec<UserRollup>,
    user_index: HashMap<String, usize>,
    /// Users whose display name is still the fallback.
    unnamed: Vec<bool>,
    categories: Vec<CategoryRollup>,
    category_index: HashMap<String, usize>,
}

impl<'o> RollupFold<'o> {
    fn new(options: &'o StatsOptions) -> Self {
        Self {
            options,
            users: Vec::new(),
            user_index: HashMap::new(),
            unnamed: Vec::new(),
            categories: Vec::new(),
            category_index: HashMap::new(),
        }
    }

    fn visit(&mut self, report: &Report) {
        if let Some(user_id) = report.submitter_id.as_deref() {
            let slot = self.user_slot(user_id);
            if self.unnamed[slot] {
                if let Some(name) = report.submitter_name.as_deref() {
                    self.users[slot].display_name = name.to_string();
                    self.unnamed[slot] = false;
                }
            }
            let user = &mut self.users[slot];
            user.total_reports += 1;
            for label in &report.category_labels {
                *user.categories.entry(label.clone()).or_insert(0) += 1;
            }
        }

        for label in &report.category_labels {
            let slot = match self.category_index.get(label) {
                Some(&slot) => slot,
                None => {
                    self.categories.push(CategoryRollup {
                        label: label.clone(),
                        count: 0,
                    });
                    self.category_index.insert(label.clone(), self.categories.len() - 1);
                    self.categories.len() - 1
                }
            };
            self.categories[slot].count += 1;
        }
    }

    fn user_slot(&mut self, user_id: &str) -> usize {
        if let Some(&slot) = self.user_index.get(user_id) {
            return slot;
        }
        self.users.push(UserRollup {
            user_id: user_id.to_string(),
            display_name: self.options.fallback_name(user_id),
            total_reports: 0,
            categories: BTreeMap::new(),
        });
        self.unnamed.push(true);
        self.user_index.insert(user_id.to_string(), self.users.len() - 1);
        self.users.len() - 1
    }

    fn finish(self) -> Statistics {
        Statistics {
            by_user: self.users,
            by_category: self.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: &str, submitter: Option<&str>, labels: &[&str]) -> Report {
        let report = Report::new(id, labels.iter().map(|l| l.to_string()).collect());
        match submitter {
            Some(user) => report.with_submitter(user, None),
            None => report,
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(aggregate(&[]), Statistics::default());
    }

    #[test]
    fn test_user_and_category_rollups() {
        let reports = vec![
            report("1", Some("u1"), &["Dengue"]),
            report("2", Some("u1"), &["Zica"]),
            report("3", None, &["Dengue"]),
        ];
        let stats = aggregate(&reports);

        assert_eq!(stats.by_user.len(), 1);
        let u1 = stats.user("u1").unwrap();
        assert_eq!(u1.total_reports, 2);
        assert_eq!(u1.categories.get("Dengue"), Some(&1));
        assert_eq!(u1.categories.get("Zica"), Some(&1));

        assert_eq!(
            stats.by_category,
            vec![
                CategoryRollup { label: "Dengue".into(), count: 2 },
                CategoryRollup { label: "Zica".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_multi_category_fans_out() {
        let stats = aggregate(&[report("1", Some("u1"), &["Dengue", "Zica"])]);
        assert_eq!(stats.category_count("Dengue"), 1);
        assert_eq!(stats.category_count("Zica"), 1);
        assert_eq!(stats.total_category_mentions(), 2);
        assert_eq!(stats.user("u1").unwrap().total_reports, 1);
    }

    #[test]
    fn test_uncategorised_report_counts_for_user_only() {
        let stats = aggregate(&[report("1", Some("u1"), &[])]);
        assert_eq!(stats.user("u1").unwrap().total_reports, 1);
        assert!(stats.user("u1").unwrap().categories.is_empty());
        assert!(stats.by_category.is_empty());
    }

    #[test]
    fn test_display_name_fallback_and_upgrade() {
        let reports = vec![
            report("1", Some("7"), &["Dengue"]),
            report("2", Some("7"), &["Dengue"]).with_submitter("7", Some("Ana")),
            report("3", Some("7"), &["Dengue"]).with_submitter("7", Some("Ana María")),
            report("4", Some("9"), &["Zica"]),
        ];
        let stats = aggregate(&reports);
        assert_eq!(stats.user("7").unwrap().display_name, "Ana");
        assert_eq!(stats.user("9").unwrap().display_name, "User ID 9");

        let options = StatsOptions {
            fallback_user_label: "Usuario ID {id}".into(),
        };
        let stats = aggregate_with(&reports, &options);
        assert_eq!(stats.user("9").unwrap().display_name, "Usuario ID 9");
    }

    #[test]
    fn test_rollups_keep_first_seen_order() {
        let reports = vec![
            report("1", Some("b"), &["Zica"]),
            report("2", Some("a"), &["Dengue"]),
            report("3", Some("b"), &["Dengue"]),
        ];
        let stats = aggregate(&reports);
        let users: Vec<_> = stats.by_user.iter().map(|u| u.user_id.as_str()).collect();
        let labels: Vec<_> = stats.by_category.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(users, vec!["b", "a"]);
        assert_eq!(labels, vec!["Zica", "Dengue"]);
    }
}
