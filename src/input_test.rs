use serde_json::json;

use super::*;
use crate::hover::HoverRecord;

// =============================================================
// Helpers
// =============================================================

fn item(id: u64) -> HoverRecord {
    HoverRecord::new(json!({ "id": id, "kind": "css" }))
}

/// Hit-test over a single row of 10px-wide items starting at x = 0.
fn row_hit(x: f64, _y: f64) -> Option<HoverRecord> {
    if (0.0..50.0).contains(&x) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let id = (x / 10.0).floor() as u64;
        Some(item(id))
    } else {
        None
    }
}

fn miss(_x: f64, _y: f64) -> Option<HoverRecord> {
    None
}

fn has_redraw(actions: &[Action<HoverRecord>]) -> bool {
    actions.iter().any(|a| matches!(a, Action::RedrawNeeded { .. }))
}

fn hovering(sm: &mut Interaction<HoverRecord>, x: f64, y: f64) {
    sm.on_pointer_move(PointerEvent::at(x, y), row_hit);
}

fn selected(actions: &[Action<HoverRecord>]) -> Option<Option<HoverRecord>> {
    actions.iter().find_map(|a| match a {
        Action::SelectItem(item) => Some(item.clone()),
        _ => None,
    })
}

// =============================================================
// Button / PointerEvent
// =============================================================

#[test]
fn button_variants_distinct() {
    assert_ne!(Button::Primary, Button::Secondary);
    assert_ne!(Button::Primary, Button::Middle);
}

#[test]
fn pointer_event_at_uses_same_page_and_offset() {
    let ev = PointerEvent::at(3.0, 4.0);
    assert_eq!(ev.offset, ev.page);
    assert!(!ev.buttons_held);
    assert!(ev.with_buttons_held(true).buttons_held);
}

// =============================================================
// Hover
// =============================================================

#[test]
fn new_machine_is_idle() {
    let sm = Interaction::<HoverRecord>::new();
    assert_eq!(sm.phase(), Phase::Idle);
    assert!(sm.hovered_item().is_none());
}

#[test]
fn move_onto_item_hovers_and_requests_hover_redraw() {
    let mut sm = Interaction::new();
    let actions = sm.on_pointer_move(PointerEvent::at(5.0, 5.0), row_hit);
    assert_eq!(actions, vec![Action::RedrawNeeded { hover_only: true }]);
    assert_eq!(sm.hovered_item(), Some(&item(0)));
    assert!(matches!(sm.phase(), Phase::Hovering(_)));
}

#[test]
fn move_within_same_item_does_not_redraw() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 1.0, 5.0);
    let actions = sm.on_pointer_move(PointerEvent::at(8.0, 5.0), row_hit);
    assert!(actions.is_empty());
}

#[test]
fn recomputed_equal_descriptor_keeps_hover() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 1.0, 5.0);
    // A brand-new but equal record from the hit-test.
    let actions = sm.on_pointer_move(PointerEvent::at(2.0, 5.0), |_, _| {
        Some(HoverRecord::new(json!({ "kind": "css", "id": 0 })))
    });
    assert!(actions.is_empty());
    assert_eq!(sm.hovered_item(), Some(&item(0)));
}

#[test]
fn move_to_different_item_redraws() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 1.0, 5.0);
    let actions = sm.on_pointer_move(PointerEvent::at(15.0, 5.0), row_hit);
    assert!(has_redraw(&actions));
    assert_eq!(sm.hovered_item(), Some(&item(1)));
}

#[test]
fn move_off_items_clears_hover() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 1.0, 5.0);
    let actions = sm.on_pointer_move(PointerEvent::at(80.0, 5.0), row_hit);
    assert_eq!(actions, vec![Action::RedrawNeeded { hover_only: true }]);
    assert!(sm.hovered_item().is_none());
}

#[test]
fn move_over_empty_space_without_hover_is_quiet() {
    let mut sm = Interaction::<HoverRecord>::new();
    let actions = sm.on_pointer_move(PointerEvent::at(80.0, 5.0), miss);
    assert!(actions.is_empty());
}

#[test]
fn page_position_recorded_only_with_a_hit() {
    let mut sm = Interaction::new();
    sm.on_pointer_move(PointerEvent::new(Point::new(5.0, 5.0), Point::new(105.0, 205.0)), row_hit);
    assert_eq!(sm.state().last_page, Point::new(105.0, 205.0));
    sm.on_pointer_move(PointerEvent::new(Point::new(90.0, 5.0), Point::new(190.0, 205.0)), row_hit);
    assert_eq!(sm.state().last_page, Point::new(105.0, 205.0));
    assert_eq!(sm.state().last_pointer, Point::new(90.0, 5.0));
}

#[test]
fn leave_clears_hover() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 1.0, 5.0);
    assert!(has_redraw(&sm.on_pointer_leave()));
    assert!(sm.hovered_item().is_none());
}

#[test]
fn leave_without_hover_is_quiet() {
    let mut sm = Interaction::<HoverRecord>::new();
    assert!(sm.on_pointer_leave().is_empty());
}

#[test]
fn leave_ends_press_but_keeps_drag_flag() {
    let mut sm = Interaction::<HoverRecord>::new();
    sm.on_pointer_down(PointerEvent::at(10.0, 10.0), Button::Primary);
    sm.on_pointer_move(PointerEvent::at(30.0, 10.0).with_buttons_held(true), miss);
    sm.on_pointer_leave();
    assert_eq!(sm.phase(), Phase::Idle);
    assert!(!sm.state().pressed);
    assert!(sm.state().moved_beyond_threshold);
}

#[test]
fn leave_while_hovering_returns_to_idle() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 12.0, 5.0);
    sm.on_pointer_down(PointerEvent::at(10.0, 10.0), Button::Primary);
    sm.on_pointer_leave();
    assert_eq!(sm.phase(), Phase::Idle);
}

// =============================================================
// Click vs drag
// =============================================================

#[test]
fn click_selects_hovered_item() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 12.0, 5.0);
    sm.on_pointer_down(PointerEvent::at(12.0, 5.0), Button::Primary);
    let actions = sm.on_pointer_up(PointerEvent::at(12.0, 5.0), Button::Primary);
    assert_eq!(selected(&actions), Some(Some(item(1))));
}

#[test]
fn click_on_empty_space_selects_nothing() {
    let mut sm = Interaction::<HoverRecord>::new();
    sm.on_pointer_down(PointerEvent::at(80.0, 5.0), Button::Primary);
    let actions = sm.on_pointer_up(PointerEvent::at(80.0, 5.0), Button::Primary);
    assert_eq!(selected(&actions), Some(None));
}

#[test]
fn small_wiggle_still_counts_as_click() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 12.0, 5.0);
    sm.on_pointer_down(PointerEvent::at(12.0, 5.0), Button::Primary);
    sm.on_pointer_move(PointerEvent::at(17.0, 10.0).with_buttons_held(true), row_hit);
    let actions = sm.on_pointer_up(PointerEvent::at(17.0, 10.0), Button::Primary);
    assert_eq!(selected(&actions), Some(Some(item(1))));
}

#[test]
fn drag_past_threshold_suppresses_selection() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 12.0, 5.0);
    sm.on_pointer_down(PointerEvent::at(12.0, 5.0), Button::Primary);
    sm.on_pointer_move(PointerEvent::at(12.0, 11.0).with_buttons_held(true), row_hit);
    let actions = sm.on_pointer_up(PointerEvent::at(12.0, 11.0), Button::Primary);
    assert_eq!(selected(&actions), None);
}

#[test]
fn drag_flag_is_monotonic_until_next_press() {
    let mut sm = Interaction::new();
    sm.on_pointer_down(PointerEvent::at(10.0, 10.0), Button::Primary);
    sm.on_pointer_move(PointerEvent::at(30.0, 10.0).with_buttons_held(true), row_hit);
    // Returning to the origin does not undo the drag.
    sm.on_pointer_move(PointerEvent::at(10.0, 10.0).with_buttons_held(true), row_hit);
    assert!(sm.state().moved_beyond_threshold);
    assert!(selected(&sm.on_pointer_up(PointerEvent::at(10.0, 10.0), Button::Primary)).is_none());

    sm.on_pointer_down(PointerEvent::at(10.0, 10.0), Button::Primary);
    assert!(!sm.state().moved_beyond_threshold);
    assert!(selected(&sm.on_pointer_up(PointerEvent::at(10.0, 10.0), Button::Primary)).is_some());
}

#[test]
fn moves_without_buttons_never_mark_drag() {
    let mut sm = Interaction::new();
    sm.on_pointer_down(PointerEvent::at(10.0, 10.0), Button::Primary);
    sm.on_pointer_move(PointerEvent::at(45.0, 10.0), row_hit);
    assert!(!sm.state().moved_beyond_threshold);
}

#[test]
fn press_shows_in_phase() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 1.0, 1.0);
    sm.on_pointer_down(PointerEvent::at(1.0, 1.0), Button::Primary);
    let hovered = item(0);
    assert_eq!(
        sm.phase(),
        Phase::Pressed { hovered: Some(&hovered), down: Point::new(1.0, 1.0), moved_beyond: false }
    );
    sm.on_pointer_up(PointerEvent::at(1.0, 1.0), Button::Primary);
    assert!(matches!(sm.phase(), Phase::Hovering(_)));
}

#[test]
fn press_does_not_change_hover() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 1.0, 1.0);
    let actions = sm.on_pointer_down(PointerEvent::at(1.0, 1.0), Button::Primary);
    assert!(actions.is_empty());
    assert_eq!(sm.hovered_item(), Some(&item(0)));
}

#[test]
fn secondary_press_reports_right_click() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 21.0, 1.0);
    let actions = sm.on_pointer_down(PointerEvent::at(21.0, 1.0), Button::Secondary);
    assert_eq!(actions, vec![Action::RightClickItem(Some(item(2)))]);
    assert!(sm.on_pointer_up(PointerEvent::at(21.0, 1.0), Button::Secondary).is_empty());
}

// =============================================================
// Double activation
// =============================================================

#[test]
fn double_click_fires_even_after_drag() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 1.0, 1.0);
    sm.on_pointer_down(PointerEvent::at(1.0, 1.0), Button::Primary);
    sm.on_pointer_move(PointerEvent::at(40.0, 1.0).with_buttons_held(true), row_hit);
    let actions = sm.on_double_click();
    assert_eq!(actions, vec![Action::DoubleActivateItem(Some(item(4)))]);
}

#[test]
fn double_click_without_hover_reports_none() {
    let mut sm = Interaction::<HoverRecord>::new();
    assert_eq!(sm.on_double_click(), vec![Action::DoubleActivateItem(None)]);
}

// =============================================================
// Data refresh
// =============================================================

#[test]
fn data_refresh_keeps_hover_when_item_unchanged() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 1.0, 1.0);
    let actions = sm.on_data_refresh(LogicalSize::new(100.0, 100.0), row_hit);
    assert!(actions.is_empty());
    assert!(sm.hovered_item().is_some());
}

#[test]
fn data_refresh_clears_hover_when_item_gone() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 1.0, 1.0);
    let actions = sm.on_data_refresh(LogicalSize::new(100.0, 100.0), miss);
    assert_eq!(actions, vec![Action::RedrawNeeded { hover_only: false }]);
    assert!(sm.hovered_item().is_none());
}

#[test]
fn data_refresh_clears_hover_when_item_differs() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 1.0, 1.0);
    let actions = sm.on_data_refresh(LogicalSize::new(100.0, 100.0), |_, _| Some(item(9)));
    assert!(has_redraw(&actions));
    assert!(sm.hovered_item().is_none());
}

#[test]
fn data_refresh_outside_bounds_clears_without_hit_test() {
    let mut sm = Interaction::new();
    hovering(&mut sm, 45.0, 30.0);
    let mut queried = false;
    let actions = sm.on_data_refresh(LogicalSize::new(40.0, 40.0), |x, y| {
        queried = true;
        row_hit(x, y)
    });
    assert!(!queried);
    assert!(has_redraw(&actions));
    assert!(sm.hovered_item().is_none());
}

#[test]
fn data_refresh_without_hover_is_quiet() {
    let mut sm = Interaction::<HoverRecord>::new();
    assert!(sm.on_data_refresh(LogicalSize::new(10.0, 10.0), row_hit).is_empty());
}
