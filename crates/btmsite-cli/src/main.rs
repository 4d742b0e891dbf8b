mod qualify;
mod rules;
mod scout;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::scout::ExportTarget;

#[derive(Debug, Parser)]
#[command(name = "btmsite")]
#[command(about = "Bitcoin ATM site qualification")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the five-step checklist for one address or business
    Qualify {
        /// Free-text address or business name
        #[arg(required_unless_present = "suggestion")]
        address: Option<String>,
        /// Minimum persons per square mile (defaults to `BTMSITE_MIN_POP_DENSITY`)
        #[arg(long)]
        min_density: Option<u64>,
        /// JSON file holding an already-resolved place; skips text lookup
        #[arg(long)]
        suggestion: Option<PathBuf>,
        /// Print the report as JSON instead of step cards
        #[arg(long)]
        json: bool,
    },
    /// Sweep a ZIP code for independent retail leads
    Scout {
        /// Five-digit ZIP code
        zip: String,
        /// Which export files to write
        #[arg(long, value_enum, default_value_t = ExportTarget::Both)]
        format: ExportTarget,
        /// Output directory (defaults to `BTMSITE_EXPORT_DIR`)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the effective qualification rules as YAML
    Rules,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Rules) {
        let rules = btmsite_core::resolve_rules(btmsite_core::load_rules_path().as_deref())?;
        return rules::run_rules(&rules);
    }

    let config = btmsite_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let rules = btmsite_core::resolve_rules(config.rules_path.as_deref())?;

    match cli.command {
        Commands::Qualify {
            address,
            min_density,
            suggestion,
            json,
        } => {
            qualify::run_qualify(
                &config,
                &rules,
                address.as_deref(),
                min_density.unwrap_or(config.min_population_density),
                suggestion.as_deref(),
                json,
            )
            .await?;
        }
        Commands::Scout { zip, format, out } => {
            let dir = out.unwrap_or_else(|| config.export_dir.clone());
            scout::run_scout(&config, &rules, &zip, format, &dir).await?;
        }
        Commands::Rules => rules::run_rules(&rules)?,
    }

    Ok(())
}
