//! Corporate-chain and category-tier classification.

use serde::{Deserialize, Serialize};

use crate::rules::QualificationRules;
use crate::verdict::CheckResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Tier1,
    Tier2,
    Unranked,
}

impl Tier {
    /// Numeric tier for display; `None` for unranked.
    #[must_use]
    pub fn rank(self) -> Option<u8> {
        match self {
            Tier::Tier1 => Some(1),
            Tier::Tier2 => Some(2),
            Tier::Unranked => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessClassification {
    pub tier: Tier,
    pub label: String,
    pub is_corporate: bool,
}

impl BusinessClassification {
    /// Render the classification as the business-type check.
    #[must_use]
    pub fn to_check(&self) -> CheckResult {
        if self.is_corporate {
            return CheckResult::fail(self.label.clone());
        }
        match self.tier.rank() {
            Some(rank) => CheckResult::success(format!("Tier {rank} ({})", self.label)),
            None => CheckResult::fail(format!("Invalid Type: {}", self.label)),
        }
    }
}

/// Whether `name` contains any blocklisted chain substring (case-insensitive).
#[must_use]
pub fn is_corporate_name(name: &str, rules: &QualificationRules) -> bool {
    let lower = name.to_lowercase();
    rules
        .corporate_blocklist
        .iter()
        .any(|chain| lower.contains(chain.as_str()))
}

fn humanize(category: &str) -> String {
    category.replace('_', " ")
}

/// Classify a business by display name and upstream category tags.
///
/// The blocklist is checked first and unconditionally. Tier-1 beats Tier-2
/// regardless of position; the unranked fallback label is the first category
/// supplied, whatever it is.
#[must_use]
pub fn classify(
    categories: &[String],
    display_name: &str,
    rules: &QualificationRules,
) -> BusinessClassification {
    if is_corporate_name(display_name, rules) {
        return BusinessClassification {
            tier: Tier::Unranked,
            label: format!("Corporate: {display_name}"),
            is_corporate: true,
        };
    }

    let Some(first) = categories.first() else {
        return BusinessClassification {
            tier: Tier::Unranked,
            label: "Unknown".to_string(),
            is_corporate: false,
        };
    };

    let ranked = |tier: Tier, set: &[String]| {
        categories
            .iter()
            .find(|c| set.contains(c))
            .map(|c| BusinessClassification {
                tier,
                label: humanize(c),
                is_corporate: false,
            })
    };

    ranked(Tier::Tier1, &rules.tier1_categories)
        .or_else(|| ranked(Tier::Tier2, &rules.tier2_categories))
        .unwrap_or_else(|| BusinessClassification {
            tier: Tier::Unranked,
            label: humanize(first),
            is_corporate: false,
        })
}
