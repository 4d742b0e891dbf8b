//! Check results, qualification steps, and the per-address report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Success,
    Fail,
    Warn,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Success => write!(f, "success"),
            CheckStatus::Fail => write!(f, "fail"),
            CheckStatus::Warn => write!(f, "warn"),
        }
    }
}

/// Outcome of one rule: a status plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Success,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Fail,
            message: message.into(),
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Warn,
            message: message.into(),
        }
    }

    /// `Warn` never blocks qualification; only `Fail` does.
    #[must_use]
    pub fn blocks_qualification(&self) -> bool {
        self.status == CheckStatus::Fail
    }
}

/// The five qualification steps, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Geocode,
    Population,
    NearbyBtms,
    BusinessType,
    StoreHours,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Geocode,
        Step::Population,
        Step::NearbyBtms,
        Step::BusinessType,
        Step::StoreHours,
    ];

    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Step::Geocode => 1,
            Step::Population => 2,
            Step::NearbyBtms => 3,
            Step::BusinessType => 4,
            Step::StoreHours => 5,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Step::Geocode => "Location",
            Step::Population => "Population density",
            Step::NearbyBtms => "Nearby BTMs",
            Step::BusinessType => "Business type",
            Step::StoreHours => "Store hours",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: Step,
    pub result: CheckResult,
}

/// Full verdict for one address: every step's result plus the context the
/// operator needs to act on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualificationReport {
    pub business_name: String,
    pub place_id: String,
    pub postal_code: String,
    pub density: u64,
    pub competitor_counts: BTreeMap<String, usize>,
    pub steps: Vec<StepOutcome>,
    pub qualified: bool,
    pub evaluated_at: DateTime<Utc>,
}

impl QualificationReport {
    /// Assemble a report; `qualified` is true iff no step failed.
    #[must_use]
    pub fn new(
        business_name: String,
        place_id: String,
        postal_code: String,
        density: u64,
        competitor_counts: BTreeMap<String, usize>,
        steps: Vec<StepOutcome>,
    ) -> Self {
        let qualified = steps.iter().all(|s| !s.result.blocks_qualification());
        Self {
            business_name,
            place_id,
            postal_code,
            density,
            competitor_counts,
            steps,
            qualified,
            evaluated_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn step(&self, step: Step) -> Option<&CheckResult> {
        self.steps.iter().find(|s| s.step == step).map(|s| &s.result)
    }

    #[must_use]
    pub fn competitor_note(&self) -> String {
        crate::competitors::competitor_note(&self.competitor_counts)
    }

    #[must_use]
    pub fn banner(&self) -> &'static str {
        if self.qualified {
            "QUALIFIED FOR PLACEMENT"
        } else {
            "NOT QUALIFIED"
        }
    }
}

/// Format an integer with comma thousands separators (`1200` -> `"1,200"`).
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(step: Step, result: CheckResult) -> StepOutcome {
        StepOutcome { step, result }
    }

    #[test]
    fn warn_does_not_block_qualification() {
        let report = QualificationReport::new(
            "Joe's Corner".to_string(),
            "p1".to_string(),
            "30301".to_string(),
            1200,
            BTreeMap::new(),
            vec![
                outcome(Step::Geocode, CheckResult::success("ZIP: 30301")),
                outcome(Step::StoreHours, CheckResult::warn("manual check")),
            ],
        );
        assert!(report.qualified);
        assert_eq!(report.banner(), "QUALIFIED FOR PLACEMENT");
    }

    #[test]
    fn any_fail_disqualifies() {
        let report = QualificationReport::new(
            "Kroger #4821".to_string(),
            "p2".to_string(),
            "30301".to_string(),
            1200,
            BTreeMap::new(),
            vec![
                outcome(Step::Population, CheckResult::success("ok")),
                outcome(Step::BusinessType, CheckResult::fail("Corporate: Kroger #4821")),
            ],
        );
        assert!(!report.qualified);
        assert_eq!(report.banner(), "NOT QUALIFIED");
        assert_eq!(
            report.step(Step::BusinessType).map(|r| r.status),
            Some(CheckStatus::Fail)
        );
    }

    #[test]
    fn thousands_separator() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1200), "1,200");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn steps_are_numbered_in_order() {
        let numbers: Vec<u8> = Step::ALL.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }
}
