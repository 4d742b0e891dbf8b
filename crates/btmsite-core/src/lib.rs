pub mod app_config;
pub mod classify;
pub mod competitors;
pub mod config;
pub mod export;
pub mod hours;
pub mod rules;
pub mod types;
pub mod verdict;

pub use app_config::AppConfig;
pub use classify::{classify, is_corporate_name, BusinessClassification, Tier};
pub use competitors::{competitor_note, scan_competitors, CompetitorScan};
pub use config::{load_app_config, load_app_config_from_env, load_rules_path};
pub use export::{
    export_file_name, leads_to_csv, leads_to_json, sanitize_csv_field, write_export,
    ExportError, ExportFormat,
};
pub use hours::classify_hours;
pub use rules::{load_rules, parse_rules, resolve_rules, QualificationRules};
pub use types::{
    BusinessStatus, Coordinate, Lead, OpeningHoursSchedule, OpeningPeriod, Place, PlaceDetails,
    PopulationDensity,
};
pub use verdict::{
    format_thousands, CheckResult, CheckStatus, QualificationReport, Step, StepOutcome,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("rules validation failed: {0}")]
    Validation(String),
}
