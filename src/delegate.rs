//! Caller capabilities consumed by the engine.

use crate::error::SurfaceError;

/// What a paint callback needs to know about the hover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRequest<'a, T> {
    /// Item under the pointer now.
    pub hovered: Option<&'a T>,
    /// Item that was hovered when the canvas was last painted.
    pub previous_hovered: Option<&'a T>,
    /// Only the hover moved since the last paint, and the previous pixels are
    /// intact, so repainting the two hover highlights is enough.
    pub hover_only_changed: bool,
}

/// The chart a canvas is drawing: hit-testing, painting, and notifications.
///
/// Callbacks run while the engine is borrowed; they must not call back into
/// the same [`crate::engine::ChartCanvas`]. Panics are not caught.
pub trait ChartDelegate {
    /// Opaque identity of a chart item. Equality decides whether the hover changed.
    type Item: Clone + PartialEq;
    /// Drawing context handed to [`ChartDelegate::draw_canvas`].
    type Context;
    /// Tooltip content for a hovered item.
    type Tooltip;

    /// Item at `(x, y)` in canvas CSS pixels, if any. Must be a pure query.
    fn hit_test(&self, x: f64, y: f64) -> Option<Self::Item>;

    /// Paint the whole chart (or just the hover delta, see [`DrawRequest`]).
    ///
    /// # Errors
    ///
    /// Returns `Err` if drawing failed; the engine propagates it unchanged.
    fn draw_canvas(&mut self, ctx: &Self::Context, request: DrawRequest<'_, Self::Item>) -> Result<(), SurfaceError>;

    /// Tooltip content for `item`, or `None` to show no tooltip.
    fn hovered_item_info(&self, item: &Self::Item) -> Option<Self::Tooltip>;

    /// A click selected `item` (or empty space). Optional.
    fn on_select_item(&mut self, _item: Option<&Self::Item>) {}

    /// A double click landed on `item` (or empty space).
    fn on_double_activate_item(&mut self, item: Option<&Self::Item>);

    /// A secondary press landed on `item` (or empty space). Optional.
    fn on_right_click_item(&mut self, _item: Option<&Self::Item>) {}
}
