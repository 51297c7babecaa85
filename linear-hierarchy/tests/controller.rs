use std::rc::Rc;
use std::time::{Duration, Instant};

use linear_hierarchy::{
    CellColors, CellProvider, CellView, DEFAULT_CELL_IDENTIFIER, GridSurface, HierarchyController,
    HierarchyError, NavigatorConfig, Node, Selection, Surface, Theme, TransitionKind,
    TransitionOutcome,
};

type Counter = Rc<std::cell::Cell<usize>>;

fn counter() -> Counter {
    Rc::new(std::cell::Cell::new(0))
}

fn hook(count: &Counter) -> impl FnOnce() + 'static {
    let count = Rc::clone(count);
    move || count.set(count.get() + 1)
}

fn sample() -> Vec<Node> {
    vec![
        Node::new("A").with_children(vec![Node::new("A1"), Node::new("A2")]),
        Node::new("B"),
    ]
}

fn names(items: &[Node]) -> Vec<&str> {
    items.iter().map(|n| n.name.as_str()).collect()
}

fn visible_names(controller: &HierarchyController) -> Vec<String> {
    controller
        .surface()
        .visible_cells()
        .iter()
        .map(|c| c.data().name.clone())
        .collect()
}

fn animated() -> HierarchyController {
    let mut controller = HierarchyController::new(sample(), GridSurface::default());
    controller.load().unwrap();
    controller
}

fn instant() -> HierarchyController {
    let mut controller = HierarchyController::new(sample(), GridSurface::default())
        .with_config(NavigatorConfig::new().reduced_motion(true));
    controller.load().unwrap();
    controller
}

fn later() -> Instant {
    Instant::now() + Duration::from_secs(5)
}

// =============================================================================
// Initial State
// =============================================================================

#[test]
fn test_initial_state_at_root() {
    let controller = animated();
    assert_eq!(controller.hierarchy_level(), 0);
    assert!(controller.state().is_at_root());
    assert_eq!(controller.current_items(), sample().as_slice());
    assert_eq!(controller.state().active_index(), None);
    assert!(!controller.is_busy());
    assert_eq!(visible_names(&controller), vec!["A", "B"]);
}

#[test]
fn test_load_uses_default_identifier() {
    let controller = animated();
    assert_eq!(controller.reuse_identifier(), DEFAULT_CELL_IDENTIFIER);
    assert!(controller.surface().is_registered(DEFAULT_CELL_IDENTIFIER));
}

// =============================================================================
// Expand / Collapse Scenario
// =============================================================================

#[test]
fn test_select_expands_then_leaf_collapses() {
    let mut controller = animated();
    let expanded = counter();
    let collapsed = counter();

    let selection = controller
        .select(0, hook(&expanded), hook(&collapsed))
        .unwrap();
    assert_eq!(selection, Selection::Expand(TransitionOutcome::Started));
    assert_eq!(controller.hierarchy_level(), 1);
    assert_eq!(names(controller.current_items()), vec!["A1", "A2"]);
    // Hook waits for the animation
    assert_eq!(expanded.get(), 0);

    assert_eq!(
        controller.advance(later()).unwrap(),
        Some(TransitionKind::Expand)
    );
    assert_eq!(expanded.get(), 1);
    assert_eq!(visible_names(&controller), vec!["A1", "A2"]);

    let selection = controller
        .select(0, hook(&expanded), hook(&collapsed))
        .unwrap();
    assert_eq!(selection, Selection::Collapse(TransitionOutcome::Started));
    assert_eq!(controller.hierarchy_level(), 0);
    assert_eq!(controller.current_items(), sample().as_slice());

    controller.advance(later()).unwrap();
    assert_eq!(collapsed.get(), 1);
    assert_eq!(expanded.get(), 1);
    assert_eq!(visible_names(&controller), vec!["A", "B"]);
}

#[test]
fn test_selected_cell_is_active_during_transition() {
    let mut controller = animated();
    controller.select(0, || {}, || {}).unwrap();

    // Old level stays visible, with the tapped cell highlighted
    let cells = controller.surface().visible_cells();
    assert_eq!(cells[0].data().name, "A");
    assert!(cells[0].data().active);
    assert!(cells[0].needs_display());
    assert!(!cells[1].data().active);
}

#[test]
fn test_collapse_highlights_parent_cell() {
    let mut controller = instant();
    controller.expand(0, || {}).unwrap();
    controller.collapse(1, || {}).unwrap();

    assert_eq!(controller.state().active_index(), Some(0));
    let cells = controller.surface().visible_cells();
    assert!(cells[0].data().active);
    assert!(!cells[1].data().active);
}

#[test]
fn test_round_trip_restores_state() {
    let mut controller = instant();
    let before_items = controller.current_items().to_vec();
    let before_level = controller.hierarchy_level();

    controller.expand(0, || {}).unwrap();
    controller.collapse(0, || {}).unwrap();

    assert_eq!(controller.current_items(), before_items.as_slice());
    assert_eq!(controller.hierarchy_level(), before_level);
}

#[test]
fn test_breadcrumbs_follow_path() {
    let roots = vec![Node::new("Root").with_children(vec![
        Node::new("Mid").with_children(vec![Node::new("Leaf")]),
    ])];
    let mut controller = HierarchyController::new(roots, GridSurface::default())
        .with_config(NavigatorConfig::new().reduced_motion(true));
    controller.expand(0, || {}).unwrap();
    controller.expand(0, || {}).unwrap();

    assert_eq!(controller.hierarchy_level(), 2);
    assert_eq!(controller.breadcrumbs(), vec!["Root", "Mid"]);
    assert_eq!(controller.state().path(), &[0, 0]);
}

// =============================================================================
// Root Boundary
// =============================================================================

#[test]
fn test_leaf_at_root_is_final_selection() {
    let mut controller = animated();
    let expanded = counter();
    let collapsed = counter();

    let selection = controller
        .select(1, hook(&expanded), hook(&collapsed))
        .unwrap();

    assert_eq!(
        selection,
        Selection::Final {
            index: 1,
            name: "B".to_string()
        }
    );
    assert_eq!(controller.hierarchy_level(), 0);
    assert_eq!(controller.current_items(), sample().as_slice());
    assert_eq!(expanded.get(), 0);
    assert_eq!(collapsed.get(), 0);
    assert!(!controller.is_busy());
}

#[test]
fn test_collapse_at_root_is_noop_but_fires_hook() {
    let mut controller = animated();
    let collapsed = counter();

    let outcome = controller.collapse(1, hook(&collapsed)).unwrap();

    assert_eq!(outcome, TransitionOutcome::BoundaryNoOp);
    assert_eq!(collapsed.get(), 1);
    assert_eq!(controller.hierarchy_level(), 0);
    assert!(!controller.is_busy());
}

#[test]
fn test_level_never_negative() {
    let mut controller = instant();
    for _ in 0..10 {
        controller.select(1, || {}, || {}).unwrap();
        controller.collapse(1, || {}).unwrap();
        assert_eq!(controller.hierarchy_level(), 0);
    }
}

// =============================================================================
// Completion Hooks
// =============================================================================

#[test]
fn test_reduced_motion_completes_synchronously() {
    let mut controller = instant();
    let expanded = counter();
    let collapsed = counter();

    assert_eq!(
        controller.expand(0, hook(&expanded)).unwrap(),
        TransitionOutcome::Completed
    );
    assert_eq!(expanded.get(), 1);
    assert!(!controller.is_busy());

    assert_eq!(
        controller.collapse(0, hook(&collapsed)).unwrap(),
        TransitionOutcome::Completed
    );
    assert_eq!(collapsed.get(), 1);
}

#[test]
fn test_zero_duration_completes_synchronously() {
    let mut controller = HierarchyController::new(sample(), GridSurface::default())
        .with_config(NavigatorConfig::new().transition(Duration::ZERO));
    let expanded = counter();

    let outcome = controller.expand(0, hook(&expanded)).unwrap();

    assert_eq!(outcome, TransitionOutcome::Completed);
    assert_eq!(expanded.get(), 1);
}

#[test]
fn test_advance_before_duration_keeps_transition() {
    let mut controller = HierarchyController::new(sample(), GridSurface::default())
        .with_config(NavigatorConfig::new().transition(Duration::from_secs(60)));
    let expanded = counter();
    controller.expand(0, hook(&expanded)).unwrap();

    assert_eq!(controller.advance(Instant::now()).unwrap(), None);
    assert!(controller.is_busy());
    assert_eq!(expanded.get(), 0);

    let (kind, progress) = controller.transition_progress(Instant::now()).unwrap();
    assert_eq!(kind, TransitionKind::Expand);
    assert!((0.0..1.0).contains(&progress));
    assert!(controller.next_completion_time().is_some());
}

#[test]
fn test_advance_fires_hook_exactly_once() {
    let mut controller = animated();
    let expanded = counter();
    controller.expand(0, hook(&expanded)).unwrap();

    controller.advance(later()).unwrap();
    controller.advance(later()).unwrap();
    controller.finish_transition().unwrap();

    assert_eq!(expanded.get(), 1);
}

#[test]
fn test_finish_transition_completes_immediately() {
    let mut controller = animated();
    let collapsed = counter();
    controller.finish_transition().unwrap();
    controller.expand(0, || {}).unwrap();
    controller.finish_transition().unwrap();
    controller.collapse(0, hook(&collapsed)).unwrap();

    assert_eq!(
        controller.finish_transition().unwrap(),
        Some(TransitionKind::Collapse)
    );
    assert_eq!(controller.finish_transition().unwrap(), None);
    assert_eq!(collapsed.get(), 1);
}

#[test]
fn test_drop_mid_transition_fires_hook() {
    let expanded = counter();
    {
        let mut controller = animated();
        controller.expand(0, hook(&expanded)).unwrap();
        assert_eq!(expanded.get(), 0);
    }
    assert_eq!(expanded.get(), 1);
}

// =============================================================================
// Ignore While Busy
// =============================================================================

#[test]
fn test_tap_during_transition_is_ignored() {
    let mut controller = animated();
    let first = counter();
    let ignored = counter();
    controller.select(0, hook(&first), || {}).unwrap();
    let items = controller.current_items().to_vec();

    assert_eq!(
        controller
            .select(1, hook(&ignored), hook(&ignored))
            .unwrap(),
        Selection::Ignored
    );
    assert_eq!(controller.hierarchy_level(), 1);
    assert_eq!(controller.current_items(), items.as_slice());

    controller.advance(later()).unwrap();
    assert_eq!(first.get(), 1);
    assert_eq!(ignored.get(), 0);
}

#[test]
fn test_explicit_calls_during_transition_still_fire_hooks() {
    let mut controller = animated();
    let first = counter();
    let expanded = counter();
    let collapsed = counter();
    assert_eq!(
        controller.expand(0, hook(&first)).unwrap(),
        TransitionOutcome::Started
    );
    let items = controller.current_items().to_vec();

    assert_eq!(
        controller.expand(0, hook(&expanded)).unwrap(),
        TransitionOutcome::Ignored
    );
    assert_eq!(
        controller.collapse(0, hook(&collapsed)).unwrap(),
        TransitionOutcome::Ignored
    );
    assert_eq!(expanded.get(), 1);
    assert_eq!(collapsed.get(), 1);
    assert_eq!(first.get(), 0);
    assert_eq!(controller.hierarchy_level(), 1);
    assert_eq!(controller.current_items(), items.as_slice());

    controller.finish_transition().unwrap();
    drop(controller);
    assert_eq!(first.get(), 1);
    assert_eq!(expanded.get(), 1);
    assert_eq!(collapsed.get(), 1);
}

#[test]
fn test_busy_ignores_even_bad_index() {
    let mut controller = animated();
    controller.expand(0, || {}).unwrap();
    assert_eq!(
        controller.select(99, || {}, || {}).unwrap(),
        Selection::Ignored
    );
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_out_of_range_index_fails_fast() {
    let mut controller = animated();

    let err = controller.select(5, || {}, || {}).unwrap_err();
    assert!(matches!(
        err,
        HierarchyError::IndexOutOfRange { index: 5, len: 2 }
    ));
    assert!(!err.is_configuration());
    assert!(controller.expand(2, || {}).is_err());
    assert!(controller.collapse(2, || {}).is_err());
    assert_eq!(controller.hierarchy_level(), 0);
}

#[test]
fn test_expand_leaf_is_error() {
    let mut controller = animated();
    let expanded = counter();

    let err = controller.expand(1, hook(&expanded)).unwrap_err();

    assert!(matches!(err, HierarchyError::NotExpandable { ref name } if name == "B"));
    assert_eq!(expanded.get(), 0);
}

struct SilentProvider;

impl CellProvider for SilentProvider {
    fn reuse_identifier(&self) -> &str {
        "Silent"
    }

    fn register(&self, _surface: &mut dyn Surface) {}
}

#[test]
fn test_unregistered_provider_fails_fast() {
    let mut controller = HierarchyController::new(sample(), GridSurface::default())
        .with_cell_provider(SilentProvider);

    let err = controller.load().unwrap_err();

    assert!(matches!(
        err,
        HierarchyError::UnregisteredCell { ref identifier } if identifier == "Silent"
    ));
    assert!(err.is_configuration());
    assert!(controller.surface().visible_cells().is_empty());
}

#[test]
fn test_unregistered_provider_still_fires_hook() {
    let mut controller = HierarchyController::new(sample(), GridSurface::default())
        .with_cell_provider(SilentProvider)
        .with_config(NavigatorConfig::new().reduced_motion(true));
    let expanded = counter();

    assert!(controller.expand(0, hook(&expanded)).is_err());
    assert_eq!(expanded.get(), 1);
    assert_eq!(controller.hierarchy_level(), 1);
}

// =============================================================================
// Theme
// =============================================================================

#[test]
fn test_set_theme_propagates_to_live_cells() {
    let mut controller = animated();
    for cell in controller.surface_mut().visible_cells_mut() {
        cell.mark_displayed();
    }
    let theme = Theme::new(
        linear_hierarchy::Color::rgb(255, 0, 0),
        linear_hierarchy::Color::rgb(0, 0, 255),
    );

    controller.set_theme(theme.clone());

    assert_eq!(controller.theme(), &theme);
    for cell in controller.surface().visible_cells() {
        assert_eq!(cell.theme(), &theme);
        assert!(cell.needs_display());
    }
}

#[test]
fn test_rendered_cells_use_configured_theme() {
    let theme = Theme::new(
        linear_hierarchy::Color::rgb(1, 2, 3),
        linear_hierarchy::Color::rgb(4, 5, 6),
    );
    let mut controller = HierarchyController::new(sample(), GridSurface::default())
        .with_config(NavigatorConfig::new().theme(theme.clone()));
    controller.load().unwrap();

    let cell = &controller.surface().visible_cells()[0];
    assert_eq!(cell.active_color(), &theme.active_color);
    assert_eq!(cell.normal_color(), &theme.normal_color);
    assert_eq!(cell.background(), &theme.normal_color);
}

// =============================================================================
// Recycling
// =============================================================================

#[test]
fn test_previous_level_cells_are_recycled() {
    let mut controller = instant();
    assert_eq!(controller.surface().reloads(), 1);

    controller.expand(0, || {}).unwrap();
    assert_eq!(controller.surface().pooled(DEFAULT_CELL_IDENTIFIER), 2);

    controller.collapse(0, || {}).unwrap();
    assert_eq!(controller.surface().pooled(DEFAULT_CELL_IDENTIFIER), 2);
    assert_eq!(controller.surface().reloads(), 3);

    let cells = controller.surface().visible_cells();
    assert_eq!(cells[0].data().name, "A");
    assert_eq!(cells[0].data().child_count, 2);
    assert_eq!(cells[1].data().name, "B");
    assert_eq!(cells[1].data().hierarchy_level, 0);
}

#[test]
fn test_cells_carry_level_and_kind() {
    let roots = vec![Node::new("A").with_children(vec![Node::dynamic("Tmp")])];
    let mut controller = HierarchyController::new(roots, GridSurface::default())
        .with_config(NavigatorConfig::new().reduced_motion(true));
    controller.expand(0, || {}).unwrap();

    let data = controller.surface().visible_cells()[0].data();
    assert_eq!(data.hierarchy_level, 1);
    assert!(data.dynamic);
    assert!(data.is_leaf());
}

// =============================================================================
// Dynamic Nodes
// =============================================================================

#[test]
fn test_insert_dynamic_at_root() {
    let mut controller = instant();

    let index = controller.insert_dynamic("New").unwrap();

    assert_eq!(index, 2);
    assert!(controller.current_items()[2].is_dynamic());
    assert_eq!(visible_names(&controller), vec!["A", "B", "New"]);
}

#[test]
fn test_insert_dynamic_respects_root_editable() {
    let mut controller = HierarchyController::new(sample(), GridSurface::default())
        .with_config(NavigatorConfig::new().root_editable(false));

    assert!(matches!(
        controller.insert_dynamic("New"),
        Err(HierarchyError::NotEditable)
    ));
    assert_eq!(controller.current_items().len(), 2);
}

#[test]
fn test_insert_dynamic_respects_parent_editable() {
    let roots = vec![
        Node::new("Open")
            .editable(true)
            .with_children(vec![Node::new("x")]),
        Node::new("Closed").with_children(vec![Node::new("y")]),
    ];
    let mut controller = HierarchyController::new(roots, GridSurface::default())
        .with_config(NavigatorConfig::new().reduced_motion(true));

    controller.expand(1, || {}).unwrap();
    assert!(matches!(
        controller.insert_dynamic("z"),
        Err(HierarchyError::NotEditable)
    ));
    controller.collapse(0, || {}).unwrap();

    controller.expand(0, || {}).unwrap();
    assert_eq!(controller.insert_dynamic("z").unwrap(), 1);
}

#[test]
fn test_dynamic_nodes_survive_navigation() {
    let roots = vec![
        Node::new("A")
            .editable(true)
            .with_children(vec![Node::new("A1")]),
        Node::new("B").with_children(vec![Node::new("B1")]),
    ];
    let mut controller = HierarchyController::new(roots, GridSurface::default())
        .with_config(NavigatorConfig::new().reduced_motion(true));

    controller.expand(0, || {}).unwrap();
    controller.insert_dynamic("Added").unwrap();
    controller.collapse(0, || {}).unwrap();
    controller.expand(1, || {}).unwrap();
    controller.collapse(0, || {}).unwrap();
    controller.expand(0, || {}).unwrap();

    assert_eq!(names(controller.current_items()), vec!["A1", "Added"]);
    assert_eq!(controller.hierarchy_items()[0].children.len(), 2);
}

#[test]
fn test_remove_static_node_is_error() {
    let mut controller = instant();

    let err = controller.remove_dynamic(0).unwrap_err();

    assert!(matches!(err, HierarchyError::StaticNode { ref name } if name == "A"));
    assert_eq!(controller.current_items().len(), 2);
}

#[test]
fn test_remove_dynamic_adjusts_highlight() {
    let mut controller = instant();
    controller.insert_dynamic("One").unwrap();
    controller.insert_dynamic("Two").unwrap();
    controller.select(1, || {}, || {}).unwrap();
    assert_eq!(controller.state().active_index(), Some(1));

    let removed = controller.remove_dynamic(2).unwrap();
    assert_eq!(removed.name, "One");
    assert_eq!(controller.state().active_index(), Some(1));
    assert_eq!(visible_names(&controller), vec!["A", "B", "Two"]);

    controller.select(2, || {}, || {}).unwrap();
    controller.remove_dynamic(2).unwrap();
    assert_eq!(controller.state().active_index(), None);
}

// =============================================================================
// Resetting
// =============================================================================

#[test]
fn test_reset_returns_to_root_and_completes_transition() {
    let mut controller = animated();
    let expanded = counter();
    controller.expand(0, hook(&expanded)).unwrap();

    controller.reset().unwrap();

    assert_eq!(expanded.get(), 1);
    assert_eq!(controller.hierarchy_level(), 0);
    assert!(!controller.is_busy());
    assert_eq!(visible_names(&controller), vec!["A", "B"]);
}

#[test]
fn test_set_hierarchy_items_replaces_tree() {
    let mut controller = instant();
    controller.expand(0, || {}).unwrap();

    controller
        .set_hierarchy_items(vec![Node::new("X"), Node::new("Y"), Node::new("Z")])
        .unwrap();

    assert_eq!(controller.hierarchy_level(), 0);
    assert_eq!(names(controller.hierarchy_items()), vec!["X", "Y", "Z"]);
    assert_eq!(visible_names(&controller), vec!["X", "Y", "Z"]);
}
