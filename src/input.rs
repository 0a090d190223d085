//! Input model: pointer events and the hover/click state machine.
//!
//! [`Interaction`] owns the [`PointerState`] and turns pointer events into
//! [`Action`]s for the engine to carry out. It never calls back into the host
//! itself; hit-testing is the one query it makes, passed in per event.
//!
//! A press is tracked alongside hover: the pointer can be idle or hovering an
//! item, and either way a primary press records where it started so release
//! can tell a click from a drag.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::CLICK_THRESHOLD_PX;
use crate::geom::{LogicalSize, Point};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A pointer event, in both canvas and page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Position relative to the canvas, in CSS pixels.
    pub offset: Point,
    /// Position relative to the page, used to anchor the tooltip.
    pub page: Point,
    /// Any button is held (only meaningful for moves).
    pub buttons_held: bool,
}

impl PointerEvent {
    #[must_use]
    pub fn new(offset: Point, page: Point) -> Self {
        Self { offset, page, buttons_held: false }
    }

    /// Event whose page position equals its canvas position.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(Point::new(x, y), Point::new(x, y))
    }

    #[must_use]
    pub fn with_buttons_held(mut self, held: bool) -> Self {
        self.buttons_held = held;
        self
    }
}

/// Effects returned from input handlers for the engine to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<T> {
    /// Repaint on the next frame. `hover_only` is set when only the hovered item changed.
    RedrawNeeded { hover_only: bool },
    /// A click landed; carries the hovered item, if any.
    SelectItem(Option<T>),
    /// A double click landed; carries the hovered item, if any.
    DoubleActivateItem(Option<T>),
    /// A secondary press landed; carries the hovered item, if any.
    RightClickItem(Option<T>),
}

/// Pointer bookkeeping owned by the state machine.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState<T> {
    /// Item under the pointer, per the last hit-test.
    pub hovered_item: Option<T>,
    /// Last canvas-relative pointer position.
    pub last_pointer: Point,
    /// Page position recorded with the current hover; the tooltip anchor.
    pub last_page: Point,
    /// Canvas-relative position of the last primary press.
    pub mouse_down: Point,
    /// A primary button is down.
    pub pressed: bool,
    /// The pointer travelled past the click threshold since the last press.
    pub moved_beyond_threshold: bool,
}

impl<T> Default for PointerState<T> {
    fn default() -> Self {
        Self {
            hovered_item: None,
            last_pointer: Point::default(),
            last_page: Point::default(),
            mouse_down: Point::default(),
            pressed: false,
            moved_beyond_threshold: false,
        }
    }
}

/// Coarse view of the interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase<'a, T> {
    /// Nothing hovered, no press.
    Idle,
    /// An item is hovered, no press.
    Hovering(&'a T),
    /// A primary press is in progress, with or without a hover.
    Pressed {
        hovered: Option<&'a T>,
        down: Point,
        moved_beyond: bool,
    },
}

/// The hover/click state machine.
#[derive(Debug, Clone)]
pub struct Interaction<T> {
    state: PointerState<T>,
}

impl<T> Default for Interaction<T> {
    fn default() -> Self {
        Self { state: PointerState::default() }
    }
}

impl<T: Clone + PartialEq> Interaction<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &PointerState<T> {
        &self.state
    }

    #[must_use]
    pub fn hovered_item(&self) -> Option<&T> {
        self.state.hovered_item.as_ref()
    }

    #[must_use]
    pub fn phase(&self) -> Phase<'_, T> {
        let hovered = self.state.hovered_item.as_ref();
        if self.state.pressed {
            return Phase::Pressed {
                hovered,
                down: self.state.mouse_down,
                moved_beyond: self.state.moved_beyond_threshold,
            };
        }
        hovered.map_or(Phase::Idle, Phase::Hovering)
    }

    /// Primary press records the origin of a possible click; secondary press
    /// reports the hovered item for a context menu. Hover is unchanged.
    pub fn on_pointer_down(&mut self, event: PointerEvent, button: Button) -> Vec<Action<T>> {
        match button {
            Button::Primary => {
                self.state.mouse_down = event.offset;
                self.state.pressed = true;
                self.state.moved_beyond_threshold = false;
                Vec::new()
            }
            Button::Secondary => vec![Action::RightClickItem(self.state.hovered_item.clone())],
            Button::Middle => Vec::new(),
        }
    }

    /// Re-run `hit_test` at the pointer and update the hover.
    ///
    /// While a button is held, travel past the click threshold from the press
    /// origin marks the gesture as a drag until the next press.
    pub fn on_pointer_move<H>(&mut self, event: PointerEvent, hit_test: H) -> Vec<Action<T>>
    where
        H: FnOnce(f64, f64) -> Option<T>,
    {
        self.state.last_pointer = event.offset;
        if event.buttons_held && self.state.mouse_down.exceeds(event.offset, CLICK_THRESHOLD_PX) {
            self.state.moved_beyond_threshold = true;
        }

        match hit_test(event.offset.x, event.offset.y) {
            Some(item) => {
                self.state.last_page = event.page;
                if self.state.hovered_item.as_ref() == Some(&item) {
                    return Vec::new();
                }
                self.state.hovered_item = Some(item);
                vec![Action::RedrawNeeded { hover_only: true }]
            }
            None => self.clear_hover(true),
        }
    }

    /// A click selects the hovered item (or nothing); a drag selects nothing.
    pub fn on_pointer_up(&mut self, _event: PointerEvent, button: Button) -> Vec<Action<T>> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.state.pressed = false;
        if self.state.moved_beyond_threshold {
            return Vec::new();
        }
        vec![Action::SelectItem(self.state.hovered_item.clone())]
    }

    /// Clear the hover and end any press; a release outside the canvas never
    /// arrives. The drag flag stays until the next press.
    pub fn on_pointer_leave(&mut self) -> Vec<Action<T>> {
        self.state.pressed = false;
        self.clear_hover(true)
    }

    /// Double activation fires regardless of how far the pointer travelled.
    pub fn on_double_click(&mut self) -> Vec<Action<T>> {
        vec![Action::DoubleActivateItem(self.state.hovered_item.clone())]
    }

    /// The chart's data changed under the pointer; drop a hover that no
    /// longer hit-tests to the same item.
    ///
    /// Positions outside `bounds` (the canvas shrank since the last move)
    /// count as a miss without querying `hit_test`. The data behind the old
    /// hover is gone, so the resulting redraw is a full one.
    pub fn on_data_refresh<H>(&mut self, bounds: LogicalSize, hit_test: H) -> Vec<Action<T>>
    where
        H: FnOnce(f64, f64) -> Option<T>,
    {
        if self.state.hovered_item.is_none() {
            return Vec::new();
        }
        let at = self.state.last_pointer;
        let fresh = if bounds.contains(at) { hit_test(at.x, at.y) } else { None };
        if fresh.as_ref() == self.state.hovered_item.as_ref() {
            return Vec::new();
        }
        self.clear_hover(false)
    }

    fn clear_hover(&mut self, hover_only: bool) -> Vec<Action<T>> {
        if self.state.hovered_item.take().is_some() {
            vec![Action::RedrawNeeded { hover_only }]
        } else {
            Vec::new()
        }
    }
}
