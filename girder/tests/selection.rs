use girder::filter::SearchFilter;
use girder::selection::SelectionState;

#[test]
fn test_select_replaces_prior_selection() {
    let mut selection = SelectionState::new();
    assert!(selection.select("a"));
    assert!(selection.is_selected(&"a"));

    assert!(selection.select("b"));
    assert!(selection.is_selected(&"b"));
    assert!(!selection.is_selected(&"a"));
    assert_eq!(selection.selected(), Some(&"b"));
}

#[test]
fn test_reselect_is_idempotent_not_toggle() {
    let mut selection = SelectionState::new();
    selection.select("a");
    assert!(!selection.select("a"));
    assert!(selection.is_selected(&"a"));
}

#[test]
fn test_clear() {
    let mut selection = SelectionState::new();
    assert!(!selection.clear());
    selection.select("a");
    assert!(selection.clear());
    assert_eq!(selection.selected(), None);
}

#[test]
fn test_selection_survives_transient_invisibility() {
    let records = vec!["Alder".to_string(), "Birch".to_string()];
    let mut selection = SelectionState::new();
    let mut filter = SearchFilter::new();

    selection.select("Alder".to_string());

    // Narrow the filter so the selected record disappears from view.
    filter.set_term("birch");
    let visible = filter.apply(&records, |r| vec![r.clone()]);
    assert!(!visible.iter().any(|r| selection.is_selected(r)));
    assert_eq!(selection.selected(), Some(&"Alder".to_string()));

    // Widening the filter re-reveals the selection highlight.
    filter.set_term("");
    let visible = filter.apply(&records, |r| vec![r.clone()]);
    assert!(visible.iter().any(|r| selection.is_selected(r)));
}
