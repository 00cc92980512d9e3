pub mod import;
pub mod plan;
pub mod prompts;
pub mod runs;
pub mod summary;
pub mod validate;

use crate::cli::args::{Cli, Command};
use anyhow::Result;
use std::path::Path;
use triage_core::config::{self, DashboardConfig};
use triage_core::errors::ConfigError;
use triage_core::model::{RunStatus, Scenario};
use triage_core::storage::Store;

pub mod exit_codes {
    pub const OK: i32 = 0;
    /// Data-integrity findings present (`validate` only).
    pub const FINDINGS: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
    pub const IO_ERROR: i32 = 3;
}

pub async fn dispatch(cli: Cli) -> Result<i32> {
    match cli.cmd {
        Command::Import(args) => import::cmd_import(args).await,
        Command::Prompts(args) => prompts::cmd_prompts(args).await,
        Command::Runs(args) => runs::cmd_runs(args).await,
        Command::Plan(args) => plan::cmd_plan(args).await,
        Command::Summary(args) => summary::cmd_summary(args).await,
        Command::Validate(args) => validate::cmd_validate(args).await,
        Command::Version => {
            println!("triage {}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

pub(crate) fn open_store(
    config_path: &Path,
    db_override: Option<&Path>,
) -> Result<(DashboardConfig, Store)> {
    let cfg = config::load_or_default(config_path)?;
    let db = db_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cfg.db.clone());
    tracing::debug!(db = %db.display(), "opening store");
    let store = Store::open(&db)?;
    store.init_schema()?;
    Ok((cfg, store))
}

pub(crate) fn parse_scenario(raw: &Option<String>) -> Result<Option<Scenario>> {
    match raw {
        None => Ok(None),
        Some(v) => Scenario::parse(v)
            .map(Some)
            .ok_or_else(|| ConfigError(format!("unknown scenario: {v}")).into()),
    }
}

// Strict on purpose: a mistyped status filter should fail loudly, not fall
// back the way the storage layer's lenient parse does.
pub(crate) fn parse_status(raw: &Option<String>) -> Result<Option<RunStatus>> {
    match raw.as_deref() {
        None => Ok(None),
        Some("queued") => Ok(Some(RunStatus::Queued)),
        Some("running") => Ok(Some(RunStatus::Running)),
        Some("succeeded") => Ok(Some(RunStatus::Succeeded)),
        Some("failed") => Ok(Some(RunStatus::Failed)),
        Some(v) => Err(ConfigError(format!("unknown status: {v}")).into()),
    }
}
