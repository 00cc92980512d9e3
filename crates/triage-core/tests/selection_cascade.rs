//! Cascading-selection behavior: selecting a base pulls its variants in,
//! variants are never independently toggleable, broken variant links never
//! expand.

use triage_core::catalog::PromptCatalog;
use triage_core::model::{LengthBin, Prompt, Scenario};
use triage_core::selection::{display_count, SelectionState};

fn prompt(id: &str, bin: LengthBin, variant_of: Option<&str>) -> Prompt {
    Prompt {
        id: id.to_string(),
        scenario: Scenario::ThreatIntelSummary,
        length_bin: bin,
        variant_of: variant_of.map(str::to_string),
        text: format!("Summarize the indicators for {id}"),
        source: None,
        token_count: None,
        created_at: None,
    }
}

fn make_catalog() -> PromptCatalog {
    PromptCatalog::build(vec![
        prompt("p1", LengthBin::Short, None),
        // Long variant listed before Medium on purpose: expansion must
        // reorder them Medium-before-Long.
        prompt("p1-l", LengthBin::Long, Some("p1")),
        prompt("p1-m", LengthBin::Medium, Some("p1")),
        prompt("p2", LengthBin::Short, None),
        prompt("p2-m", LengthBin::Medium, Some("p2")),
    ])
}

#[test]
fn test_selection_cascade_order() {
    let catalog = make_catalog();
    let mut sel = SelectionState::new();

    sel.toggle(&catalog, "p1");
    assert_eq!(
        sel.effective_selection(&catalog),
        vec!["p1".to_string(), "p1-m".to_string(), "p1-l".to_string()]
    );

    sel.toggle(&catalog, "p1");
    assert!(sel.effective_selection(&catalog).is_empty());
}

#[test]
fn test_variant_immunity() {
    let catalog = make_catalog();
    let mut sel = SelectionState::new();

    sel.toggle(&catalog, "p1-m");
    assert!(sel.selected().is_empty());

    sel.toggle(&catalog, "p1");
    let before = sel.selected().to_vec();
    sel.toggle(&catalog, "p1-l");
    assert_eq!(sel.selected(), before.as_slice());
}

#[test]
fn test_multiple_bases_keep_insertion_order() {
    let catalog = make_catalog();
    let mut sel = SelectionState::new();

    sel.toggle(&catalog, "p2");
    sel.toggle(&catalog, "p1");
    assert_eq!(
        sel.effective_selection(&catalog),
        vec![
            "p2".to_string(),
            "p2-m".to_string(),
            "p1".to_string(),
            "p1-m".to_string(),
            "p1-l".to_string(),
        ]
    );
}

#[test]
fn test_select_all_replaces_previous_selection() {
    let catalog = make_catalog();
    let mut sel = SelectionState::new();

    sel.toggle(&catalog, "p1");
    sel.select_all(&catalog, &["p2".to_string(), "p2-m".to_string()]);
    assert_eq!(sel.selected(), &["p2".to_string()]);

    sel.clear();
    assert!(sel.selected().is_empty());
    assert!(sel.effective_selection(&catalog).is_empty());
}

#[test]
fn test_orphan_variant_never_expands_and_does_not_crash() {
    let catalog = PromptCatalog::build(vec![
        prompt("p1", LengthBin::Short, None),
        prompt("p1-m", LengthBin::Medium, Some("p1")),
        prompt("stray-m", LengthBin::Medium, Some("vanished")),
    ]);

    let mut sel = SelectionState::new();
    sel.toggle(&catalog, "p1");
    sel.toggle(&catalog, "stray-m");
    let effective = sel.effective_selection(&catalog);
    assert_eq!(effective, vec!["p1".to_string(), "p1-m".to_string()]);
    assert!(!effective.contains(&"stray-m".to_string()));

    // Still independently listed in flat mode.
    assert_eq!(display_count(&catalog, false), 3);
    assert_eq!(display_count(&catalog, true), 1);
}

#[test]
fn test_chained_variant_is_rejected_from_expansion() {
    let catalog = PromptCatalog::build(vec![
        prompt("p1", LengthBin::Short, None),
        prompt("p1-m", LengthBin::Medium, Some("p1")),
        prompt("p1-m-l", LengthBin::Long, Some("p1-m")),
    ]);

    let mut sel = SelectionState::new();
    sel.toggle(&catalog, "p1");
    assert_eq!(
        sel.effective_selection(&catalog),
        vec!["p1".to_string(), "p1-m".to_string()]
    );
    assert_eq!(catalog.findings().len(), 1);
}

#[test]
fn test_duplicate_variant_entries_collapse_by_id() {
    let catalog = PromptCatalog::build(vec![
        prompt("p1", LengthBin::Short, None),
        prompt("p1-m", LengthBin::Medium, Some("p1")),
        prompt("p1-m", LengthBin::Medium, Some("p1")),
    ]);

    let mut sel = SelectionState::new();
    sel.toggle(&catalog, "p1");
    assert_eq!(
        sel.effective_selection(&catalog),
        vec!["p1".to_string(), "p1-m".to_string()]
    );
}

#[test]
fn test_effective_selection_is_deterministic() {
    let catalog = make_catalog();
    let mut sel = SelectionState::new();
    sel.toggle(&catalog, "p1");
    sel.toggle(&catalog, "p2");

    let a = sel.effective_selection(&catalog);
    let b = sel.effective_selection(&catalog);
    assert_eq!(a, b);
}

#[test]
fn test_display_count_modes() {
    let catalog = make_catalog();
    // Nested: bases only.
    assert_eq!(display_count(&catalog, true), 2);
    // Flat: every row.
    assert_eq!(display_count(&catalog, false), 5);
}
