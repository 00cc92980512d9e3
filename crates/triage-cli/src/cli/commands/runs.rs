use super::{exit_codes, open_store, parse_scenario, parse_status};
use crate::cli::args::RunsArgs;
use anyhow::Result;
use triage_core::providers::{RunFilter, RunSource};

pub async fn cmd_runs(args: RunsArgs) -> Result<i32> {
    let (_cfg, store) = open_store(&args.config, args.db.as_deref())?;

    let filter = RunFilter {
        model: args.model.clone(),
        scenario: parse_scenario(&args.scenario)?,
        status: parse_status(&args.status)?,
        source: args.source.clone(),
        experiment: args.experiment.clone(),
        page: args.page,
        limit: args.limit,
    };
    let runs = RunSource::list(&store, &filter).await?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&runs)?);
        return Ok(exit_codes::OK);
    }

    if runs.is_empty() {
        eprintln!("No runs match.");
        return Ok(exit_codes::OK);
    }
    for r in &runs {
        let bin = r
            .prompt_length_bin
            .as_ref()
            .map(|b| b.code().to_string())
            .unwrap_or_else(|| "?".into());
        let score = r
            .scores
            .as_ref()
            .map(|s| format!("{:.2}", s.composite))
            .unwrap_or_else(|| "-".into());
        eprintln!(
            "{:<16} {:<12} {:<10} {:<4} {:>9.4} {:>6}",
            r.id,
            r.model,
            r.status.as_str(),
            bin,
            r.economics.aud_cost,
            score
        );
    }
    eprintln!("\n{} runs (page {})", runs.len(), args.page);
    Ok(exit_codes::OK)
}
