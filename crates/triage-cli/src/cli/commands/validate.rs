use super::{exit_codes, open_store};
use crate::cli::args::ValidateArgs;
use anyhow::Result;
use triage_core::catalog::PromptCatalog;
use triage_core::providers::{PromptFilter, PromptSource};
use triage_core::report::console;

pub async fn cmd_validate(args: ValidateArgs) -> Result<i32> {
    let (_cfg, store) = open_store(&args.config, args.db.as_deref())?;

    let prompts = PromptSource::list(&store, &PromptFilter::default()).await?;
    let catalog = PromptCatalog::build(prompts);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(catalog.findings())?);
    } else {
        console::print_findings(catalog.findings());
    }

    if catalog.findings().is_empty() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::FINDINGS)
    }
}
