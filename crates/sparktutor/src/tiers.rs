// SPDX-FileCopyrightText: 2026 SparkTutor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sparktutor tiers` command implementation.

use sparktutor_config::model::TutorConfig;
use sparktutor_core::TutorError;
use sparktutor_router::{ModelTier, TierRegistry};

pub fn print_tiers(config: &TutorConfig) -> Result<(), TutorError> {
    let registry = TierRegistry::from_config(&config.tiers)?;
    for tier in registry.iter() {
        println!("{}", format_tier(tier));
    }
    Ok(())
}

fn format_tier(tier: &ModelTier) -> String {
    let template = tier.prompt_template.as_str().replace('\n', "\\n");
    format!(
        "{:<7} {:<20} {:>4}s  {template}",
        tier.key.to_string(),
        tier.identifier,
        tier.timeout.as_secs()
    )
}
