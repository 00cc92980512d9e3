use super::{exit_codes, open_store, parse_scenario};
use crate::cli::args::PlanArgs;
use anyhow::Result;
use triage_core::catalog::PromptCatalog;
use triage_core::providers::{PromptFilter, PromptSource};
use triage_core::selection::SelectionState;

pub async fn cmd_plan(args: PlanArgs) -> Result<i32> {
    let (cfg, store) = open_store(&args.config, args.db.as_deref())?;

    let scenario = match &args.scenario {
        Some(_) => parse_scenario(&args.scenario)?,
        None => cfg.defaults.scenario,
    };
    // A plan always needs the variant rows: expansion is the whole point.
    let filter = PromptFilter {
        scenario,
        include_variants: true,
        ..Default::default()
    };
    let prompts = PromptSource::list(&store, &filter).await?;
    let catalog = PromptCatalog::build(prompts);

    let mut selection = SelectionState::new();
    if args.all {
        let visible: Vec<String> = catalog.prompts().iter().map(|p| p.id.clone()).collect();
        selection.select_all(&catalog, &visible);
    } else {
        for id in &args.select {
            selection.toggle(&catalog, id);
        }
    }
    let effective = selection.effective_selection(&catalog);

    if args.format == "json" {
        let payload = serde_json::json!({
            "selected": selection.selected(),
            "effective": effective,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(exit_codes::OK);
    }

    if effective.is_empty() {
        eprintln!("Nothing selected.");
        return Ok(exit_codes::OK);
    }
    for id in &effective {
        if catalog.is_base(id) {
            eprintln!("{id}");
        } else {
            eprintln!("  └ {id}");
        }
    }
    eprintln!(
        "\n{} prompts in plan ({} bases)",
        effective.len(),
        selection.selected().len()
    );
    Ok(exit_codes::OK)
}
