//! Offline replay of a batch file

use std::fs;
use std::path::Path;

use anyhow::Context;

use assetcheck::api::AppState;
use assetcheck::config::AppConfig;
use assetcheck::output::OutputMode;
use assetcheck::replay::{parse_batch, parse_reviews, replay as run_replay};

/// Submit a batch file, apply optional decisions, and print the result
pub fn replay(
    config: &AppConfig,
    cases_path: &Path,
    reviews_path: Option<&Path>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let text = fs::read_to_string(cases_path)
        .with_context(|| format!("Failed to read {}", cases_path.display()))?;
    let cases = parse_batch(&text)?;

    let reviews = match reviews_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            parse_reviews(&text)?
        },
        None => Vec::new(),
    };

    let state = AppState::from_config(config)?;
    let report = run_replay(&state, cases, &reviews)?;
    report.render(mode);
    Ok(())
}
