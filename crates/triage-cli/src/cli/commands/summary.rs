use super::{exit_codes, open_store, parse_scenario};
use crate::cli::args::SummaryArgs;
use anyhow::Result;
use triage_core::aggregate::aggregate;
use triage_core::providers::{RunFilter, RunSource};
use triage_core::report::console;

pub async fn cmd_summary(args: SummaryArgs) -> Result<i32> {
    let (_cfg, store) = open_store(&args.config, args.db.as_deref())?;

    let filter = RunFilter {
        model: args.model.clone(),
        scenario: parse_scenario(&args.scenario)?,
        status: None,
        source: args.source.clone(),
        experiment: args.experiment.clone(),
        page: args.page,
        limit: args.limit,
    };
    let runs = RunSource::list(&store, &filter).await?;
    let report = aggregate(&runs);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        console::print_summary(&report);
    }
    Ok(exit_codes::OK)
}
