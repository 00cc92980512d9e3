use crate::aggregate::BinReport;
use crate::catalog::{IntegrityFinding, PromptCatalog};

pub fn print_summary(report: &BinReport) {
    if report.is_empty() {
        if report.excluded.total() > 0 {
            eprintln!(
                "No scored runs to summarize ({} excluded: {} not succeeded, {} unscored, {} missing bin)",
                report.excluded.total(),
                report.excluded.not_succeeded,
                report.excluded.unscored,
                report.excluded.missing_bin
            );
        } else {
            eprintln!("No run data.");
        }
        return;
    }

    eprintln!(
        "\n{:<4} {:>6} {:>9} {:>10} {:>9} {:>10}",
        "bin", "runs", "quality", "cost", "tokens", "qual/$"
    );
    for row in &report.rows {
        let efficiency = row
            .quality_per_dollar
            .map(|q| format!("{:.1}", q))
            .unwrap_or_else(|| "n/a".into());
        let marker = if row.is_best_value { "  ⭐ best value" } else { "" };
        eprintln!(
            "{:<4} {:>6} {:>9.2} {:>10.4} {:>9.0} {:>10}{}",
            row.bin.code(),
            row.count,
            row.avg_quality,
            row.avg_cost,
            row.avg_tokens,
            efficiency,
            marker
        );
    }

    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if report.excluded.total() > 0 {
        eprintln!(
            "Excluded: {} not succeeded, {} unscored, {} missing bin",
            report.excluded.not_succeeded, report.excluded.unscored, report.excluded.missing_bin
        );
    }
}

pub fn print_prompts(catalog: &PromptCatalog, include_variants: bool) {
    if catalog.is_empty() {
        eprintln!("No prompts.");
        return;
    }

    if include_variants {
        for p in catalog.prompts() {
            if !p.is_base() {
                continue;
            }
            eprintln!(
                "{:<24} {:<22} {:<6} {}",
                p.id,
                p.scenario.as_str(),
                p.length_bin.code(),
                truncate(&p.text, 60)
            );
            for v in catalog.variants_of(&p.id) {
                eprintln!("  └ {:<20} {:<6}", v.id, v.length_bin.code());
            }
        }
    } else {
        for p in catalog.prompts() {
            eprintln!(
                "{:<24} {:<22} {:<6} {}",
                p.id,
                p.scenario.as_str(),
                p.length_bin.code(),
                truncate(&p.text, 60)
            );
        }
    }

    eprintln!(
        "\n{} prompts shown",
        crate::selection::display_count(catalog, include_variants)
    );
    if !catalog.findings().is_empty() {
        eprintln!(
            "⚠️  {} data-integrity findings (run `triage validate` for details)",
            catalog.findings().len()
        );
    }
}

pub fn print_findings(findings: &[IntegrityFinding]) {
    if findings.is_empty() {
        eprintln!("✅ Catalog is clean.");
        return;
    }
    for f in findings {
        match f {
            IntegrityFinding::OrphanVariant { id, missing_base } => {
                eprintln!("❌ orphan variant {:<24} (base '{}' not in catalog)", id, missing_base);
            }
            IntegrityFinding::VariantChain { id, via } => {
                eprintln!("❌ variant chain  {:<24} (variant_of '{}' is itself a variant)", id, via);
            }
            IntegrityFinding::DuplicateVariantBin { base, bin, ids } => {
                eprintln!(
                    "⚠️  duplicate bin  {:<24} ({} variants in bin {}: {})",
                    base,
                    ids.len(),
                    bin.code(),
                    ids.join(", ")
                );
            }
        }
    }
    eprintln!("\n{} findings", findings.len());
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}
