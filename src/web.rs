//! Browser bindings.
//!
//! This module is the only place that touches `web_sys`. It adapts an
//! `HtmlCanvasElement` to [`Surface`], `requestAnimationFrame` to
//! [`FrameScheduler`], and a positioned `<div>` to [`TooltipRenderer`], plus
//! helpers to turn DOM mouse events into [`PointerEvent`]s.

#[cfg(test)]
#[path = "web_test.rs"]
mod web_test;

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent};

use crate::consts::{DEFAULT_DEVICE_PIXEL_RATIO, TOOLTIP_CLASS};
use crate::error::SurfaceError;
use crate::geom::{LogicalSize, PhysicalSize, Point};
use crate::input::{Button, PointerEvent};
use crate::scheduler::FrameScheduler;
use crate::surface::{DrawingContext, Surface};
use crate::tooltip::{TooltipRenderer, TooltipView, place};

// =============================================================
// Surface
// =============================================================

/// A `<canvas>` element as a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct HtmlCanvasSurface {
    canvas: Option<HtmlCanvasElement>,
    opaque: bool,
}

impl HtmlCanvasSurface {
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas: Some(canvas), opaque: false }
    }

    /// Request an opaque (`alpha: false`) context; charts that paint their
    /// own background get cheaper compositing.
    #[must_use]
    pub fn opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }

    #[must_use]
    pub fn canvas(&self) -> Option<&HtmlCanvasElement> {
        self.canvas.as_ref()
    }

    /// Forget the element; later paints are skipped.
    pub fn detach(&mut self) {
        self.canvas = None;
    }

    fn context_options(&self) -> Result<JsValue, SurfaceError> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("alpha"), &JsValue::from_bool(!self.opaque))?;
        Ok(options.into())
    }
}

impl Surface for HtmlCanvasSurface {
    type Context = CanvasRenderingContext2d;

    fn is_attached(&self) -> bool {
        self.canvas.as_ref().is_some_and(|c| c.is_connected())
    }

    fn device_pixel_ratio(&self) -> f64 {
        web_sys::window().map_or(DEFAULT_DEVICE_PIXEL_RATIO, |w| w.device_pixel_ratio())
    }

    fn backing_size(&self) -> PhysicalSize {
        self.canvas
            .as_ref()
            .map_or_else(PhysicalSize::default, |c| PhysicalSize::new(c.width(), c.height()))
    }

    fn reset_backing_store(&mut self, physical: PhysicalSize, logical: LogicalSize) -> Result<(), SurfaceError> {
        let Some(canvas) = self.canvas.as_ref() else {
            return Ok(());
        };
        canvas.set_width(physical.width);
        canvas.set_height(physical.height);
        let style = canvas.style();
        style.set_property("width", &format!("{}px", logical.width))?;
        style.set_property("height", &format!("{}px", logical.height))?;
        Ok(())
    }

    fn create_context(&mut self) -> Result<Self::Context, SurfaceError> {
        let canvas = self.canvas.as_ref().ok_or(SurfaceError::ContextUnavailable)?;
        let options = self.context_options()?;
        let Some(ctx) = canvas.get_context_with_context_options("2d", &options)? else {
            return Err(SurfaceError::ContextUnavailable);
        };
        ctx.dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable)
    }

    fn set_class_name(&mut self, class_name: &str) {
        if let Some(canvas) = self.canvas.as_ref() {
            canvas.set_class_name(class_name);
        }
    }
}

impl DrawingContext for CanvasRenderingContext2d {
    fn scale(&self, factor: f64) -> Result<(), SurfaceError> {
        CanvasRenderingContext2d::scale(self, factor, factor)?;
        Ok(())
    }
}

// =============================================================
// Frames
// =============================================================

/// [`FrameScheduler`] backed by `window.requestAnimationFrame`.
///
/// Without a window, or if the browser refuses the request, the callback runs
/// immediately instead of being lost.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnimationFrameScheduler;

impl FrameScheduler for AnimationFrameScheduler {
    fn schedule_once(&self, callback: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            callback();
            return;
        };

        let slot = Rc::new(RefCell::new(Some(callback)));
        let slot_for_frame = Rc::clone(&slot);
        let frame = Closure::once_into_js(move |_ts: f64| {
            let callback = slot_for_frame.borrow_mut().take();
            if let Some(callback) = callback {
                callback();
            }
        });

        if let Err(err) = window.request_animation_frame(frame.unchecked_ref()) {
            warn!("canvas: requestAnimationFrame failed, painting now: {err:?}");
            let callback = slot.borrow_mut().take();
            if let Some(callback) = callback {
                callback();
            }
        }
    }
}

// =============================================================
// Tooltip
// =============================================================

/// Absolutely positioned `<div>` appended to `<body>`, showing text content.
///
/// The element is removed from the document on drop.
pub struct DomTooltip {
    element: HtmlElement,
}

impl DomTooltip {
    /// Create the (hidden) tooltip element.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the element cannot be created or the document has no body.
    pub fn new(document: &Document) -> Result<Self, SurfaceError> {
        let element = document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SurfaceError::Js("tooltip element is not an HtmlElement".to_owned()))?;
        element.set_class_name(TOOLTIP_CLASS);
        let style = element.style();
        style.set_property("position", "absolute")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("display", "none")?;
        let body = document
            .body()
            .ok_or_else(|| SurfaceError::Js("document has no body".to_owned()))?;
        body.append_child(&element)?;
        Ok(Self { element })
    }

    #[must_use]
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn try_show(&self, view: &TooltipView<String>) -> Result<(), SurfaceError> {
        self.element.set_text_content(Some(&view.content));
        let style = self.element.style();
        style.set_property("display", "block")?;

        let size = LogicalSize::new(
            f64::from(self.element.offset_width()),
            f64::from(self.element.offset_height()),
        );
        let at = place(view.anchor, size, viewport_size());
        style.set_property("left", &format!("{}px", at.x))?;
        style.set_property("top", &format!("{}px", at.y))?;
        Ok(())
    }
}

impl TooltipRenderer<String> for DomTooltip {
    fn show(&mut self, view: &TooltipView<String>) {
        if let Err(err) = self.try_show(view) {
            warn!("canvas: tooltip show failed: {err}");
        }
    }

    fn hide(&mut self) {
        if let Err(err) = self.element.style().set_property("display", "none") {
            warn!("canvas: tooltip hide failed: {err:?}");
        }
    }
}

impl Drop for DomTooltip {
    fn drop(&mut self) {
        self.element.remove();
    }
}

/// Window inner size in CSS pixels, or zero (unknown to [`place`]) when unavailable.
fn viewport_size() -> LogicalSize {
    let Some(window) = web_sys::window() else {
        return LogicalSize::default();
    };
    let dim = |v: Result<JsValue, JsValue>| v.map_or(0.0, |v| v.as_f64().unwrap_or(0.0));
    LogicalSize::new(dim(window.inner_width()), dim(window.inner_height()))
}

// =============================================================
// DOM events
// =============================================================

/// Map a DOM `MouseEvent.button` code.
///
/// Back/forward (3, 4) and anything else map to `None`; callers drop the event.
#[must_use]
pub fn map_button(button: i16) -> Option<Button> {
    match button {
        0 => Some(Button::Primary),
        1 => Some(Button::Middle),
        2 => Some(Button::Secondary),
        _ => None,
    }
}

/// Convert a DOM mouse event on the canvas into a [`PointerEvent`].
#[must_use]
pub fn pointer_event(ev: &MouseEvent) -> PointerEvent {
    PointerEvent::new(
        Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y())),
        Point::new(f64::from(ev.page_x()), f64::from(ev.page_y())),
    )
    .with_buttons_held(ev.buttons() != 0)
}
