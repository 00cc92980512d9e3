use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "triage",
    version,
    about = "Cost/quality comparison for LLM security benchmark runs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load prompts and runs from a JSON export into the local db
    Import(ImportArgs),
    /// List the prompt catalog
    Prompts(PromptsArgs),
    /// List raw run records
    Runs(RunsArgs),
    /// Expand a selection of base prompts into the experiment plan
    Plan(PlanArgs),
    /// Per-length-bin summary with best-value highlighting
    Summary(SummaryArgs),
    /// Check the prompt catalog for data-integrity problems
    Validate(ValidateArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ImportArgs {
    #[arg(long, default_value = "triage.yaml")]
    pub config: PathBuf,

    /// Database path (overrides the config file)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// JSON file with top-level "prompts" and/or "runs" arrays
    #[arg(long)]
    pub input: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PromptsArgs {
    #[arg(long, default_value = "triage.yaml")]
    pub config: PathBuf,

    #[arg(long)]
    pub db: Option<PathBuf>,

    #[arg(long)]
    pub scenario: Option<String>,

    /// Length bin filter (s|m|l|xs|xl or a full label)
    #[arg(long)]
    pub bin: Option<String>,

    #[arg(long)]
    pub source: Option<String>,

    /// Free-text match against prompt text
    #[arg(long)]
    pub query: Option<String>,

    /// Flat listing: no variant expansion, every row independent
    #[arg(long)]
    pub no_variants: bool,

    /// Output format: text | json
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RunsArgs {
    #[arg(long, default_value = "triage.yaml")]
    pub config: PathBuf,

    #[arg(long)]
    pub db: Option<PathBuf>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub scenario: Option<String>,

    /// queued|running|succeeded|failed
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub experiment: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 100)]
    pub limit: u32,

    /// Output format: text | json
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PlanArgs {
    #[arg(long, default_value = "triage.yaml")]
    pub config: PathBuf,

    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Base prompt ids to toggle into the selection (repeatable)
    #[arg(long = "select")]
    pub select: Vec<String>,

    /// Select every visible base prompt instead
    #[arg(long)]
    pub all: bool,

    #[arg(long)]
    pub scenario: Option<String>,

    /// Output format: text | json
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SummaryArgs {
    #[arg(long, default_value = "triage.yaml")]
    pub config: PathBuf,

    #[arg(long)]
    pub db: Option<PathBuf>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub scenario: Option<String>,

    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub experiment: Option<String>,

    /// Fetch window; the summary covers only this page of runs
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 500)]
    pub limit: u32,

    /// Output format: text | json
    #[arg(long, default_value = "text")]
    pub format: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long, default_value = "triage.yaml")]
    pub config: PathBuf,

    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Output format: text | json
    #[arg(long, default_value = "text")]
    pub format: String,
}
