//! Tooltip for the hovered item.
//!
//! [`resolve`] decides whether a tooltip shows at all; [`place`] keeps it on
//! screen. Rendering goes through a [`TooltipRenderer`], wrapped in a
//! [`TooltipAdapter`] that only hides what it has shown.

#[cfg(test)]
#[path = "tooltip_test.rs"]
mod tooltip_test;

use crate::consts::TOOLTIP_MOUSE_OFFSET_PX;
use crate::geom::{LogicalSize, Point};

/// Tooltip content anchored at a page position.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipView<C> {
    pub content: C,
    /// Page position of the pointer when the hover was recorded.
    pub anchor: Point,
}

/// Tooltip for the current hover, if one should show.
///
/// Nothing shows while `dragging`, without a hovered item, or when `info`
/// has nothing to say about the item. `info` is only called with an item.
pub fn resolve<T, C, F>(dragging: bool, hovered: Option<&T>, anchor: Point, info: F) -> Option<TooltipView<C>>
where
    F: FnOnce(&T) -> Option<C>,
{
    if dragging {
        return None;
    }
    let content = info(hovered?)?;
    Some(TooltipView { content, anchor })
}

/// Top-left corner for a tooltip of `size` next to the pointer at `anchor`.
///
/// Sits below and to the right of the pointer, flipping to the other side on
/// any axis where it would overflow `viewport`, and never goes negative. An
/// empty viewport axis (size unknown) is never flipped.
#[must_use]
pub fn place(anchor: Point, size: LogicalSize, viewport: LogicalSize) -> Point {
    let axis = |pointer: f64, extent: f64, limit: f64| {
        let after = pointer + TOOLTIP_MOUSE_OFFSET_PX;
        if limit > 0.0 && after + extent > limit {
            (pointer - TOOLTIP_MOUSE_OFFSET_PX - extent).max(0.0)
        } else {
            after
        }
    };
    Point::new(
        axis(anchor.x, size.width, viewport.width),
        axis(anchor.y, size.height, viewport.height),
    )
}

/// Displays tooltip content somewhere.
pub trait TooltipRenderer<C> {
    fn show(&mut self, view: &TooltipView<C>);
    fn hide(&mut self);
}

/// Tracks visibility so a renderer is only hidden after being shown.
pub struct TooltipAdapter<C> {
    renderer: Box<dyn TooltipRenderer<C>>,
    visible: bool,
}

impl<C> TooltipAdapter<C> {
    #[must_use]
    pub fn new(renderer: Box<dyn TooltipRenderer<C>>) -> Self {
        Self { renderer, visible: false }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn sync(&mut self, view: Option<&TooltipView<C>>) {
        match view {
            Some(view) => {
                self.renderer.show(view);
                self.visible = true;
            }
            None if self.visible => {
                self.renderer.hide();
                self.visible = false;
            }
            None => {}
        }
    }
}
