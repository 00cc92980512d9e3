//! Per-length-bin summary statistics over a window of run records.
//!
//! Turns a flat run collection into one comparison row per observed bin:
//! average quality, cost, prompt tokens, and cost-efficiency, with a
//! deterministic best-value tie-break. Excluded records are tallied, never
//! silently dropped from accounting.

use crate::model::{LengthBin, Run, RunStatus};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BinSummary {
    pub bin: LengthBin,
    pub count: usize,
    pub avg_quality: f64,
    pub avg_cost: f64,
    pub avg_tokens: f64,
    /// `None` when the bin's average cost is exactly zero: the efficiency
    /// metric is not computable, not infinite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_per_dollar: Option<f64>,
    pub is_best_value: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct ExclusionCounts {
    /// Runs that never reached `succeeded`.
    pub not_succeeded: usize,
    /// Succeeded runs with a missing or non-positive composite score.
    pub unscored: usize,
    /// Runs with no usable bin label.
    pub missing_bin: usize,
}

impl ExclusionCounts {
    pub fn total(&self) -> usize {
        self.not_succeeded + self.unscored + self.missing_bin
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BinReport {
    pub rows: Vec<BinSummary>,
    pub excluded: ExclusionCounts,
}

impl BinReport {
    /// Nothing survived the filter. Callers render an explicit "no data"
    /// state, distinguishable from "data excluded" via the tallies.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Default)]
struct Acc {
    quality: f64,
    cost: f64,
    prompt_tokens: f64,
    count: usize,
}

/// Aggregate an already-fetched run window into per-bin summary rows.
///
/// Pure and idempotent; safe to re-invoke wholesale on every input change.
/// Row order is canonical S, M, L, then any other observed bin in first-seen
/// order — never by the magnitude of a statistic.
pub fn aggregate(runs: &[Run]) -> BinReport {
    let mut excluded = ExclusionCounts::default();
    // First-seen grouping; bins per window are few, linear scan is fine.
    let mut groups: Vec<(LengthBin, Acc)> = Vec::new();

    for run in runs {
        if run.status != RunStatus::Succeeded {
            excluded.not_succeeded += 1;
            continue;
        }
        // A zero or missing composite means the run was never judged;
        // averaging it in would bias quality toward zero.
        let Some(composite) = run
            .scores
            .as_ref()
            .map(|s| s.composite)
            .filter(|c| *c > 0.0)
        else {
            excluded.unscored += 1;
            continue;
        };
        let bin = match &run.prompt_length_bin {
            Some(b) if !b.is_unlabeled() => b.clone(),
            _ => {
                excluded.missing_bin += 1;
                continue;
            }
        };

        // Prompt length, not response length: the embedded prompt
        // reference's own token count, else the run's input tokens.
        let prompt_tokens = run
            .prompt
            .as_ref()
            .and_then(|p| p.token_count)
            .unwrap_or(run.tokens.input);

        let slot = match groups.iter().position(|(b, _)| *b == bin) {
            Some(i) => i,
            None => {
                groups.push((bin, Acc::default()));
                groups.len() - 1
            }
        };
        let acc = &mut groups[slot].1;
        acc.quality += composite;
        acc.cost += run.economics.aud_cost;
        acc.prompt_tokens += prompt_tokens as f64;
        acc.count += 1;
    }

    if excluded.total() > 0 {
        tracing::debug!(
            not_succeeded = excluded.not_succeeded,
            unscored = excluded.unscored,
            missing_bin = excluded.missing_bin,
            "runs excluded from bin aggregation"
        );
    }

    // Stable sort keeps first-seen order among the non-canonical bins.
    groups.sort_by_key(|(bin, _)| bin.canonical_rank().unwrap_or(u8::MAX));

    let mut rows: Vec<BinSummary> = groups
        .into_iter()
        .map(|(bin, acc)| {
            let n = acc.count as f64;
            let avg_quality = acc.quality / n;
            let avg_cost = acc.cost / n;
            let quality_per_dollar = if avg_cost == 0.0 {
                None
            } else {
                Some(avg_quality / avg_cost)
            };
            BinSummary {
                bin,
                count: acc.count,
                avg_quality,
                avg_cost,
                avg_tokens: acc.prompt_tokens / n,
                quality_per_dollar,
                is_best_value: false,
            }
        })
        .collect();

    // All rows tied at the maximum finite efficiency are flagged; no
    // arbitrary single-winner pick. Zero-cost rows never qualify.
    let best = rows
        .iter()
        .filter_map(|r| r.quality_per_dollar)
        .fold(None::<f64>, |max, v| Some(max.map_or(v, |m| m.max(v))));
    if let Some(best) = best {
        for row in &mut rows {
            if row.quality_per_dollar == Some(best) {
                row.is_best_value = true;
            }
        }
    }

    BinReport { rows, excluded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Economics, Scenario, Scores, TokenUsage};

    fn run(bin: &str, status: RunStatus, composite: f64, cost: f64) -> Run {
        Run {
            id: format!("r-{bin}-{composite}-{cost}"),
            prompt_id: "p1".to_string(),
            model: "sec-7b".to_string(),
            status,
            prompt_length_bin: Some(LengthBin::parse(bin)),
            prompt: None,
            tokens: TokenUsage {
                input: 100,
                output: 200,
                total: 300,
            },
            economics: Economics {
                aud_cost: cost,
                extra: Default::default(),
            },
            scores: Some(Scores {
                composite,
                dimensions: Default::default(),
            }),
            experiment: None,
            scenario: Scenario::IncidentResponse,
            source: None,
            created_at: None,
        }
    }

    #[test]
    fn zero_cost_bin_has_no_efficiency_and_never_wins() {
        let runs = vec![
            run("s", RunStatus::Succeeded, 4.0, 0.0),
            run("m", RunStatus::Succeeded, 1.0, 0.01),
        ];
        let report = aggregate(&runs);
        let s = &report.rows[0];
        let m = &report.rows[1];
        assert_eq!(s.quality_per_dollar, None);
        assert!(!s.is_best_value);
        assert!(m.is_best_value);
    }

    #[test]
    fn all_zero_cost_means_no_best_value_at_all() {
        let runs = vec![run("s", RunStatus::Succeeded, 4.0, 0.0)];
        let report = aggregate(&runs);
        assert!(report.rows.iter().all(|r| !r.is_best_value));
    }

    #[test]
    fn missing_bin_is_tallied_not_grouped() {
        let mut no_bin = run("s", RunStatus::Succeeded, 4.0, 0.01);
        no_bin.prompt_length_bin = None;
        let mut blank_bin = run("s", RunStatus::Succeeded, 4.0, 0.01);
        blank_bin.prompt_length_bin = Some(LengthBin::Other("  ".into()));
        let report = aggregate(&[no_bin, blank_bin]);
        assert!(report.is_empty());
        assert_eq!(report.excluded.missing_bin, 2);
    }

    #[test]
    fn legacy_bins_group_after_canonical_ones() {
        let runs = vec![
            run("xl", RunStatus::Succeeded, 3.0, 0.05),
            run("s", RunStatus::Succeeded, 4.0, 0.01),
            run("xs", RunStatus::Succeeded, 2.0, 0.01),
        ];
        let report = aggregate(&runs);
        let bins: Vec<&str> = report.rows.iter().map(|r| r.bin.code()).collect();
        assert_eq!(bins, vec!["S", "XL", "XS"]);
    }
}
