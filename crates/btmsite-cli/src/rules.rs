//! `rules` command: print the rule set in effect after any YAML override.

use btmsite_core::QualificationRules;

pub(crate) fn run_rules(rules: &QualificationRules) -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(rules)?);
    Ok(())
}
