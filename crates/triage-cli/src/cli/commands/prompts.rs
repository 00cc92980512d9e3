use super::{exit_codes, open_store, parse_scenario};
use crate::cli::args::PromptsArgs;
use anyhow::Result;
use triage_core::catalog::PromptCatalog;
use triage_core::model::LengthBin;
use triage_core::providers::{PromptFilter, PromptSource};
use triage_core::report::console;
use triage_core::selection::display_count;

pub async fn cmd_prompts(args: PromptsArgs) -> Result<i32> {
    let (cfg, store) = open_store(&args.config, args.db.as_deref())?;

    let include_variants = if args.no_variants {
        false
    } else {
        cfg.defaults.include_variants
    };
    let scenario = match &args.scenario {
        Some(_) => parse_scenario(&args.scenario)?,
        None => cfg.defaults.scenario,
    };
    let filter = PromptFilter {
        scenario,
        length_bin: args.bin.as_deref().map(LengthBin::parse),
        source: args.source.clone(),
        query: args.query.clone(),
        include_variants,
    };

    let prompts = PromptSource::list(&store, &filter).await?;
    let catalog = PromptCatalog::build(prompts);

    if args.format == "json" {
        let payload = serde_json::json!({
            "prompts": catalog.prompts(),
            "findings": catalog.findings(),
            "count": display_count(&catalog, include_variants),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        console::print_prompts(&catalog, include_variants);
    }
    Ok(exit_codes::OK)
}
