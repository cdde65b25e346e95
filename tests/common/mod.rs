//! Shared fixtures for the integration suites.
#![allow(dead_code)]

use pestwatch::Report;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const CATEGORIES: [&str; 4] = ["Dengue", "Zica", "Leishmaniasis", "Chikungunya"];

/// A few hundred reports over a small coordinate grid so that collisions
/// are common. Some reports are anonymous, some unlocated, some name two
/// categories.
pub fn random_reports(seed: u64, n: usize) -> Vec<Report> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let first = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
            let mut labels = vec![first.to_string()];
            if rng.gen_bool(0.25) {
                let second = CATEGORIES[rng.gen_range(0..CATEGORIES.len())];
                if second != first {
                    labels.push(second.to_string());
                }
            }

            let mut report = Report::new(format!("r{i}"), labels);
            if rng.gen_bool(0.85) {
                let lat = -22.0 - f64::from(rng.gen_range(0..6u8)) * 0.01;
                let lng = -63.0 - f64::from(rng.gen_range(0..6u8)) * 0.01;
                report = report.with_location(lat, lng);
            }
            if rng.gen_bool(0.8) {
                let user = format!("u{}", rng.gen_range(0..12));
                report = report.with_submitter(user, None);
            }
            report
        })
        .collect()
}
