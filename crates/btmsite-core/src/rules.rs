//! Static qualification rule tables.
//!
//! Built-in defaults cover the production rule set. A YAML file may override
//! any subset of fields; omitted fields keep their defaults.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const CORPORATE_CHAIN_BLOCKLIST: &[&str] = &[
    // big box / pharmacy
    "walmart",
    "target",
    "cvs",
    "walgreens",
    "rite aid",
    "costco",
    "sam's club",
    // national c-stores
    "7-eleven",
    "7 eleven",
    "circle k",
    "casey's general store",
    // super-regional c-stores
    "wawa",
    "sheetz",
    "quiktrip",
    "kum & go",
    "royal farms",
    "mapco",
    // national gas brands (exclusive c-store deals)
    "bp",
    "shell",
    "exxon",
    "mobil",
    "chevron",
    "texaco",
    "sunoco",
    "marathon",
    "citgo",
    // travel plazas
    "pilot",
    "flying j",
    "love's travel stop",
    // grocery
    "kroger",
    "albertsons",
    "safeway",
    "publix",
    "food lion",
    "meijer",
    "stop & shop",
    "giant",
    "heb",
    "winn-dixie",
    // dollar stores
    "dollar general",
    "family dollar",
    "dollar tree",
];

const TIER_1_CATEGORIES: &[&str] = &["supermarket", "grocery_or_supermarket", "convenience_store"];

const TIER_2_CATEGORIES: &[&str] = &[
    "liquor_store",
    "hardware_store",
    "laundromat",
    "restaurant",
    "cafe",
    "meal_takeaway",
    "pawn_shop",
    "pharmacy",
    "shoe_store",
    "shopping_mall",
    "jewelry_store",
    "car_repair",
    "auto_parts_store",
    "sporting_goods_store",
    "bowling_alley",
    "casino",
    "bank",
    "store",
    "lodging",
    "clothing_store",
    "thrift_store",
    "bar",
];

const COMPETITOR_KEYWORDS: &[&str] = &[
    "coinflip",
    "coin cloud",
    "rockitcoin",
    "coinstar",
    "bitstop",
    "athena",
    "libertyx",
    "bytefederal",
    "get bitcoin",
];

const SCOUT_CATEGORIES: &[&str] = &[
    "supermarket",
    "convenience_store",
    "liquor_store",
    "laundromat",
    "restaurant",
    "pawn_shop",
    "pharmacy",
];

/// One statute mile in meters.
pub const ONE_MILE_METERS: f64 = 1609.34;

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// The rule set applied by both the single-address qualifier and the bulk
/// scout. Minimum population density is per run and lives outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QualificationRules {
    /// Lower-case name substrings that mark a corporate chain.
    pub corporate_blocklist: Vec<String>,
    pub tier1_categories: Vec<String>,
    pub tier2_categories: Vec<String>,
    /// Lower-case name substrings identifying competitor kiosks; first match wins.
    pub competitor_keywords: Vec<String>,
    /// Lower-case name substring identifying the operator's own kiosks.
    pub self_brand_marker: String,
    pub min_open_days: usize,
    pub min_daily_open_minutes: u32,
    pub competitor_radius_meters: f64,
    pub competitor_search_keyword: String,
    pub scout_categories: Vec<String>,
    pub scout_radius_meters: f64,
}

impl Default for QualificationRules {
    fn default() -> Self {
        Self {
            corporate_blocklist: owned(CORPORATE_CHAIN_BLOCKLIST),
            tier1_categories: owned(TIER_1_CATEGORIES),
            tier2_categories: owned(TIER_2_CATEGORIES),
            competitor_keywords: owned(COMPETITOR_KEYWORDS),
            self_brand_marker: "bitcoin depot".to_string(),
            min_open_days: 5,
            min_daily_open_minutes: 9 * 60,
            competitor_radius_meters: ONE_MILE_METERS,
            competitor_search_keyword: "bitcoin atm".to_string(),
            scout_categories: owned(SCOUT_CATEGORIES),
            scout_radius_meters: 5000.0,
        }
    }
}

impl QualificationRules {
    /// Whole hours in the daily-open threshold, for messages.
    #[must_use]
    pub fn min_daily_open_hours(&self) -> u32 {
        self.min_daily_open_minutes / 60
    }
}

/// Load rules from a YAML file, falling back to defaults for omitted fields.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rules(path: &Path) -> Result<QualificationRules, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_rules(&content)
}

/// Parse and validate rules from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_rules(yaml: &str) -> Result<QualificationRules, ConfigError> {
    let rules: QualificationRules =
        serde_yaml::from_str(yaml).map_err(ConfigError::RulesFileParse)?;
    validate_rules(&rules)?;
    Ok(rules)
}

/// Resolve the effective rules: the YAML file when a path is configured,
/// the built-in defaults otherwise.
///
/// # Errors
///
/// Propagates any [`load_rules`] failure.
pub fn resolve_rules(path: Option<&Path>) -> Result<QualificationRules, ConfigError> {
    match path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading rule overrides");
            load_rules(p)
        }
        None => Ok(QualificationRules::default()),
    }
}

fn validate_list(field: &str, list: &[String]) -> Result<(), ConfigError> {
    for entry in list {
        if entry.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{field} contains an empty entry"
            )));
        }
        if entry.to_lowercase() != *entry {
            return Err(ConfigError::Validation(format!(
                "{field} entry '{entry}' must be lower-case"
            )));
        }
    }
    Ok(())
}

fn validate_rules(rules: &QualificationRules) -> Result<(), ConfigError> {
    validate_list("corporate_blocklist", &rules.corporate_blocklist)?;
    validate_list("tier1_categories", &rules.tier1_categories)?;
    validate_list("tier2_categories", &rules.tier2_categories)?;
    validate_list("competitor_keywords", &rules.competitor_keywords)?;
    validate_list("scout_categories", &rules.scout_categories)?;

    if rules.self_brand_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "self_brand_marker must be non-empty".to_string(),
        ));
    }
    if rules.self_brand_marker.to_lowercase() != rules.self_brand_marker {
        return Err(ConfigError::Validation(
            "self_brand_marker must be lower-case".to_string(),
        ));
    }

    let tier1: HashSet<&str> = rules.tier1_categories.iter().map(String::as_str).collect();
    if let Some(overlap) = rules
        .tier2_categories
        .iter()
        .find(|c| tier1.contains(c.as_str()))
    {
        return Err(ConfigError::Validation(format!(
            "category '{overlap}' is listed in both tiers"
        )));
    }

    if rules.scout_categories.is_empty() {
        return Err(ConfigError::Validation(
            "scout_categories must list at least one category".to_string(),
        ));
    }
    if rules.min_open_days == 0 || rules.min_open_days > 7 {
        return Err(ConfigError::Validation(format!(
            "min_open_days {} must be between 1 and 7",
            rules.min_open_days
        )));
    }
    if rules.min_daily_open_minutes == 0 || rules.min_daily_open_minutes > 24 * 60 {
        return Err(ConfigError::Validation(format!(
            "min_daily_open_minutes {} must be between 1 and 1440",
            rules.min_daily_open_minutes
        )));
    }
    if rules.competitor_radius_meters <= 0.0 || rules.scout_radius_meters <= 0.0 {
        return Err(ConfigError::Validation(
            "search radii must be positive".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
