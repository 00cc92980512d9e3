use crate::model::{LengthBin, Prompt, Run, RunStatus, Scenario};
use async_trait::async_trait;

/// Narrowing filters for a prompt catalog fetch.
#[derive(Debug, Clone)]
pub struct PromptFilter {
    pub scenario: Option<Scenario>,
    pub length_bin: Option<LengthBin>,
    pub source: Option<String>,
    /// Free-text match against prompt text.
    pub query: Option<String>,
    /// When set, the response carries each matching base's variants
    /// alongside it, whether or not they match the filters themselves.
    pub include_variants: bool,
}

impl Default for PromptFilter {
    fn default() -> Self {
        Self {
            scenario: None,
            length_bin: None,
            source: None,
            query: None,
            include_variants: true,
        }
    }
}

/// Narrowing filters for a run fetch. Pagination happens at the source; the
/// core aggregates whatever window it is handed.
#[derive(Debug, Clone)]
pub struct RunFilter {
    pub model: Option<String>,
    pub scenario: Option<Scenario>,
    pub status: Option<RunStatus>,
    pub source: Option<String>,
    pub experiment: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for RunFilter {
    fn default() -> Self {
        Self {
            model: None,
            scenario: None,
            status: None,
            source: None,
            experiment: None,
            page: 1,
            limit: 100,
        }
    }
}

#[async_trait]
pub trait PromptSource: Send + Sync {
    async fn list(&self, filter: &PromptFilter) -> anyhow::Result<Vec<Prompt>>;
}

#[async_trait]
pub trait RunSource: Send + Sync {
    async fn list(&self, filter: &RunFilter) -> anyhow::Result<Vec<Run>>;
}
