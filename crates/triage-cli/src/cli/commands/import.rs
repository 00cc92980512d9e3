use super::{exit_codes, open_store};
use crate::cli::args::ImportArgs;
use anyhow::{Context, Result};
use serde::Deserialize;
use triage_core::fingerprint::file_fingerprint;
use triage_core::model::{Prompt, Run};

#[derive(Debug, Deserialize)]
struct ImportDoc {
    #[serde(default)]
    prompts: Vec<Prompt>,
    #[serde(default)]
    runs: Vec<Run>,
}

pub async fn cmd_import(args: ImportArgs) -> Result<i32> {
    let (_cfg, store) = open_store(&args.config, args.db.as_deref())?;

    let text = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("failed to read input: {:?}", args.input))?;
    let doc: ImportDoc =
        serde_json::from_str(&text).context("failed to parse import JSON")?;

    if doc.prompts.is_empty() && doc.runs.is_empty() {
        anyhow::bail!(
            "no prompts or runs in {:?} (expected top-level \"prompts\" / \"runs\" arrays)",
            args.input
        );
    }

    for p in &doc.prompts {
        store.insert_prompt(p)?;
    }
    for r in &doc.runs {
        store.insert_run(r)?;
    }

    let fingerprint = file_fingerprint(&args.input)?;
    store.record_import(
        &args.input.to_string_lossy(),
        &fingerprint,
        doc.prompts.len(),
        doc.runs.len(),
    )?;

    println!(
        "✅ Imported {} prompts, {} runs from {:?}",
        doc.prompts.len(),
        doc.runs.len(),
        args.input
    );
    Ok(exit_codes::OK)
}
