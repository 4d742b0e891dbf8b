//! Nearby kiosk scan: the operator's own machines versus competitors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::QualificationRules;
use crate::verdict::CheckResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorScan {
    /// Nearby kiosks carrying the operator's own brand.
    pub self_brand_count: usize,
    /// Occurrences per competitor keyword.
    pub competitor_counts: BTreeMap<String, usize>,
}

impl CompetitorScan {
    #[must_use]
    pub fn total_competitors(&self) -> usize {
        self.competitor_counts.values().sum()
    }

    #[must_use]
    pub fn competitor_note(&self) -> String {
        competitor_note(&self.competitor_counts)
    }

    /// Any own-brand kiosk nearby disqualifies; competitors are informational.
    #[must_use]
    pub fn to_check(&self) -> CheckResult {
        if self.self_brand_count > 0 {
            CheckResult::fail(format!(
                "Found {} own-network BTM(s) nearby.",
                self.self_brand_count
            ))
        } else {
            CheckResult::success(format!(
                "Own-network BTMs: 0, competitors: {}",
                self.total_competitors()
            ))
        }
    }
}

/// `"bitstop: 2, coinflip: 1"`, or `"None found."` when there are no counts.
#[must_use]
pub fn competitor_note(counts: &BTreeMap<String, usize>) -> String {
    if counts.is_empty() {
        return "None found.".to_string();
    }
    counts
        .iter()
        .map(|(name, count)| format!("{name}: {count}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Partition nearby result names into own-brand and competitor counts.
///
/// The first matching competitor keyword wins for each name. Names matching
/// nothing are ignored.
pub fn scan_competitors<'a, I>(names: I, rules: &QualificationRules) -> CompetitorScan
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scan = CompetitorScan::default();

    for name in names {
        let lower = name.to_lowercase();
        if lower.contains(rules.self_brand_marker.as_str()) {
            scan.self_brand_count += 1;
            continue;
        }

        match rules
            .competitor_keywords
            .iter()
            .find(|kw| lower.contains(kw.as_str()))
        {
            Some(kw) => *scan.competitor_counts.entry(kw.clone()).or_insert(0) += 1,
            None => tracing::debug!(name = %lower, "found unknown BTM"),
        }
    }

    scan
}
