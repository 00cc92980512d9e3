//! Indexed view over a fetched prompt list.
//!
//! Builds the base → variants index the selection engine expands through and
//! sweeps the list for data-integrity problems: orphan variants, multi-level
//! variant chains, duplicate variant bins. Findings are observations, never
//! errors — a broken row stays listed, it just does not expand.

use crate::model::{LengthBin, Prompt};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityFinding {
    /// A variant whose `variant_of` target is absent from the catalog.
    OrphanVariant { id: String, missing_base: String },
    /// A variant whose `variant_of` itself points at a variant. Chains are
    /// rejected at ingestion: the row never expands under any base.
    VariantChain { id: String, via: String },
    /// A base with more than one variant in the same length bin.
    DuplicateVariantBin {
        base: String,
        bin: LengthBin,
        ids: Vec<String>,
    },
}

pub struct PromptCatalog {
    prompts: Vec<Prompt>,
    by_id: HashMap<String, usize>,
    variants: HashMap<String, Vec<usize>>,
    findings: Vec<IntegrityFinding>,
}

impl PromptCatalog {
    pub fn build(prompts: Vec<Prompt>) -> Self {
        let mut by_id = HashMap::new();
        for (idx, p) in prompts.iter().enumerate() {
            // First occurrence wins on duplicate ids.
            by_id.entry(p.id.clone()).or_insert(idx);
        }

        let mut variants: HashMap<String, Vec<usize>> = HashMap::new();
        let mut findings = Vec::new();

        for (idx, p) in prompts.iter().enumerate() {
            let Some(base_id) = &p.variant_of else {
                continue;
            };
            match by_id.get(base_id).map(|&i| &prompts[i]) {
                None => {
                    tracing::warn!(
                        variant = %p.id,
                        missing_base = %base_id,
                        "orphan variant: base prompt not in catalog"
                    );
                    findings.push(IntegrityFinding::OrphanVariant {
                        id: p.id.clone(),
                        missing_base: base_id.clone(),
                    });
                }
                Some(base) if base.variant_of.is_some() => {
                    tracing::warn!(
                        variant = %p.id,
                        via = %base_id,
                        "variant chain rejected: variant_of points at a variant"
                    );
                    findings.push(IntegrityFinding::VariantChain {
                        id: p.id.clone(),
                        via: base_id.clone(),
                    });
                }
                Some(_) => {
                    variants.entry(base_id.clone()).or_default().push(idx);
                }
            }
        }

        // Duplicate-bin sweep, base-by-base in catalog order so findings
        // come out in a stable order.
        for p in &prompts {
            if !p.is_base() {
                continue;
            }
            let Some(idxs) = variants.get(&p.id) else {
                continue;
            };
            let mut by_bin: Vec<(LengthBin, Vec<String>)> = Vec::new();
            for &i in idxs {
                let v = &prompts[i];
                match by_bin.iter().position(|(b, _)| *b == v.length_bin) {
                    Some(slot) => by_bin[slot].1.push(v.id.clone()),
                    None => by_bin.push((v.length_bin.clone(), vec![v.id.clone()])),
                }
            }
            for (bin, ids) in by_bin {
                if ids.len() > 1 {
                    tracing::warn!(
                        base = %p.id,
                        bin = %bin.as_str(),
                        "duplicate variant bin: base has {} variants in one bin",
                        ids.len()
                    );
                    findings.push(IntegrityFinding::DuplicateVariantBin {
                        base: p.id.clone(),
                        bin,
                        ids,
                    });
                }
            }
        }

        Self {
            prompts,
            by_id,
            variants,
            findings,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Prompt> {
        self.by_id.get(id).map(|&i| &self.prompts[i])
    }

    pub fn is_base(&self, id: &str) -> bool {
        self.get(id).is_some_and(Prompt::is_base)
    }

    /// Variants of a base prompt, in catalog order. Orphans and chained
    /// variants are never indexed here.
    pub fn variants_of(&self, base_id: &str) -> Vec<&Prompt> {
        self.variants
            .get(base_id)
            .map(|idxs| idxs.iter().map(|&i| &self.prompts[i]).collect())
            .unwrap_or_default()
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn findings(&self) -> &[IntegrityFinding] {
        &self.findings
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}
