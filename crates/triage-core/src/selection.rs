use crate::catalog::PromptCatalog;
use crate::model::Prompt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Caller-owned selection over base prompts. Selecting a base transparently
/// pulls its length-bin variants into the effective selection; variants are
/// never independently selectable.
///
/// Insertion order is kept for stable display; it carries no weight for
/// aggregation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionState {
    selected: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Add or remove a base prompt. Variant ids and ids absent from the
    /// catalog are a silent no-op, so `selected` can never hold an id the
    /// catalog cannot expand.
    pub fn toggle(&mut self, catalog: &PromptCatalog, id: &str) {
        let Some(prompt) = catalog.get(id) else {
            tracing::debug!(id, "toggle ignored: id not in catalog");
            return;
        };
        if !prompt.is_base() {
            tracing::debug!(id, "toggle ignored: variants are not selectable");
            return;
        }
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(id.to_string());
        }
    }

    /// Replace the selection with the base prompts among `visible_ids`,
    /// keeping the given order.
    pub fn select_all(&mut self, catalog: &PromptCatalog, visible_ids: &[String]) {
        let mut seen = HashSet::new();
        self.selected = visible_ids
            .iter()
            .filter(|id| catalog.is_base(id))
            .filter(|id| seen.insert(id.to_string()))
            .cloned()
            .collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// The expanded list of prompt ids an experiment would run against:
    /// every selected base, each followed by its variants sorted
    /// Medium-before-Long (catalog-order ties, duplicates collapsed by id).
    ///
    /// Pure and deterministic: identical inputs give identical output.
    pub fn effective_selection(&self, catalog: &PromptCatalog) -> Vec<String> {
        let mut out = Vec::new();
        for id in &self.selected {
            // A stale selection may predate a catalog refetch; skip ids the
            // current catalog no longer knows as bases.
            if !catalog.is_base(id) {
                tracing::debug!(id = %id, "selected id is no longer a base prompt; skipped");
                continue;
            }
            out.push(id.clone());

            let mut seen = HashSet::new();
            let mut variants: Vec<&Prompt> = catalog
                .variants_of(id)
                .into_iter()
                .filter(|v| seen.insert(v.id.clone()))
                .collect();
            // Stable sort over the catalog-ordered list: canonical bins
            // first (Medium before Long), anything else after.
            variants.sort_by_key(|v| v.length_bin.canonical_rank().unwrap_or(u8::MAX));
            out.extend(variants.into_iter().map(|v| v.id.clone()));
        }
        out
    }
}

/// Number of rows the prompt list shows. With variants nested under their
/// base only bases count; in a flat listing every catalog row counts,
/// orphans and unrecognized bins included.
pub fn display_count(catalog: &PromptCatalog, include_variants: bool) -> usize {
    if include_variants {
        catalog.prompts().iter().filter(|p| p.is_base()).count()
    } else {
        catalog.len()
    }
}
