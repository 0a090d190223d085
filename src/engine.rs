//! The chart canvas controller.
//!
//! [`CanvasCore`] holds all state and logic: surface, pointer state, pending
//! redraw, and config. Its handlers carry out the [`Action`]s the input state
//! machine produces and report whether a frame needs scheduling; they never
//! schedule one themselves, which keeps the core testable without a frame
//! source.
//!
//! [`ChartCanvas`] wraps the core in `Rc<RefCell<_>>` and owns the
//! [`FrameScheduler`]. Scheduled frames hold only a weak reference, so
//! dropping the handle cancels any pending paint.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use log::{debug, error};

use crate::config::CanvasConfig;
use crate::delegate::{ChartDelegate, DrawRequest};
use crate::error::SurfaceError;
use crate::input::{Action, Button, Interaction, PointerEvent};
use crate::scheduler::{FrameScheduler, RedrawScheduler};
use crate::surface::{Surface, SurfaceManager};
use crate::tooltip::{self, TooltipAdapter, TooltipRenderer, TooltipView};

/// Core canvas state: everything that doesn't depend on a frame source.
pub struct CanvasCore<S, D>
where
    S: Surface,
    D: ChartDelegate<Context = S::Context>,
{
    surface: SurfaceManager<S>,
    interaction: Interaction<D::Item>,
    redraw: RedrawScheduler,
    delegate: D,
    config: CanvasConfig,
    /// Hover as of the last completed paint.
    painted_hover: Option<D::Item>,
    /// The last paint failed; its pixels can't be trusted for a hover-only pass.
    needs_full: bool,
    mounted: bool,
    paints: u64,
    tooltip: Option<TooltipAdapter<D::Tooltip>>,
}

impl<S, D> CanvasCore<S, D>
where
    S: Surface,
    D: ChartDelegate<Context = S::Context>,
{
    #[must_use]
    pub fn new(mut surface: S, delegate: D, config: CanvasConfig) -> Self {
        surface.set_class_name(&config.class_name);
        Self {
            surface: SurfaceManager::new(surface, config.density_relative),
            interaction: Interaction::new(),
            redraw: RedrawScheduler::new(),
            delegate,
            config,
            painted_hover: None,
            needs_full: false,
            mounted: true,
            paints: 0,
            tooltip: None,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    #[must_use]
    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    #[must_use]
    pub fn surface(&self) -> &SurfaceManager<S> {
        &self.surface
    }

    #[must_use]
    pub fn interaction(&self) -> &Interaction<D::Item> {
        &self.interaction
    }

    #[must_use]
    pub fn hovered_item(&self) -> Option<&D::Item> {
        self.interaction.hovered_item()
    }

    #[must_use]
    pub fn redraw_pending(&self) -> bool {
        self.redraw.is_pending()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Number of paints that reached the delegate.
    #[must_use]
    pub fn paint_count(&self) -> u64 {
        self.paints
    }

    /// Tooltip for the current hover, if one should show.
    #[must_use]
    pub fn tooltip_view(&self) -> Option<TooltipView<D::Tooltip>> {
        let delegate = &self.delegate;
        tooltip::resolve(
            self.config.dragging,
            self.interaction.hovered_item(),
            self.interaction.state().last_page,
            |item| delegate.hovered_item_info(item),
        )
    }

    // --- Inputs ---
    //
    // Each returns whether the caller must schedule a frame.

    pub fn on_pointer_down(&mut self, event: PointerEvent, button: Button) -> bool {
        let actions = self.interaction.on_pointer_down(event, button);
        self.dispatch(actions)
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent) -> bool {
        let delegate = &self.delegate;
        let actions = self.interaction.on_pointer_move(event, |x, y| delegate.hit_test(x, y));
        self.dispatch(actions)
    }

    pub fn on_pointer_up(&mut self, event: PointerEvent, button: Button) -> bool {
        let actions = self.interaction.on_pointer_up(event, button);
        self.dispatch(actions)
    }

    pub fn on_pointer_leave(&mut self) -> bool {
        let actions = self.interaction.on_pointer_leave();
        self.dispatch(actions)
    }

    pub fn on_double_click(&mut self) -> bool {
        let actions = self.interaction.on_double_click();
        self.dispatch(actions)
    }

    /// The delegate's data changed; re-validate the hover against it.
    pub fn on_data_changed(&mut self) -> bool {
        let delegate = &self.delegate;
        let bounds = self.config.logical_size();
        let actions = self.interaction.on_data_refresh(bounds, |x, y| delegate.hit_test(x, y));
        self.dispatch(actions)
    }

    /// Replace the config. Always requests a full redraw.
    pub fn set_config(&mut self, config: CanvasConfig) -> bool {
        if config.class_name != self.config.class_name {
            self.surface.surface_mut().set_class_name(&config.class_name);
        }
        self.surface.set_density_relative(config.density_relative);
        self.config = config;
        self.sync_tooltip();
        self.redraw.request(false)
    }

    /// Request a full redraw.
    pub fn request_redraw(&mut self) -> bool {
        self.redraw.request(false)
    }

    pub fn set_tooltip_renderer(&mut self, renderer: Box<dyn TooltipRenderer<D::Tooltip>>) {
        self.tooltip = Some(TooltipAdapter::new(renderer));
        self.sync_tooltip();
    }

    /// Stop painting; pending and future frames become no-ops.
    pub fn unmount(&mut self) {
        self.mounted = false;
        if let Some(adapter) = self.tooltip.as_mut() {
            adapter.sync(None);
        }
    }

    // --- Frames ---

    /// Run a scheduled frame: clear the pending flag, then paint if still live.
    ///
    /// # Errors
    ///
    /// Propagates any surface or delegate failure from the paint.
    pub fn on_frame(&mut self) -> Result<(), SurfaceError> {
        let Some(hover_only) = self.redraw.take() else {
            return Ok(());
        };
        if !self.mounted {
            debug!("canvas: frame dropped, unmounted");
            return Ok(());
        }
        self.paint(hover_only)
    }

    /// Paint now with current state, outside the frame cycle.
    ///
    /// # Errors
    ///
    /// Propagates any surface or delegate failure.
    pub fn paint_now(&mut self) -> Result<(), SurfaceError> {
        if !self.mounted {
            return Ok(());
        }
        self.paint(false)
    }

    fn paint(&mut self, hover_only: bool) -> Result<(), SurfaceError> {
        let hover_only = hover_only && !self.needs_full;
        let logical = self.config.logical_size();
        let delegate = &mut self.delegate;
        let hovered = self.interaction.hovered_item();
        let previous = self.painted_hover.as_ref();

        let result = self.surface.paint(logical, |ctx, reset| {
            let request = DrawRequest {
                hovered,
                previous_hovered: previous,
                hover_only_changed: hover_only && !reset,
            };
            delegate.draw_canvas(ctx, request)
        });
        let painted = match result {
            Ok(painted) => painted,
            Err(err) => {
                self.needs_full = true;
                return Err(err);
            }
        };

        if painted {
            self.needs_full = false;
            self.paints += 1;
            self.painted_hover = self.interaction.hovered_item().cloned();
        }
        Ok(())
    }

    fn dispatch(&mut self, actions: Vec<Action<D::Item>>) -> bool {
        let mut schedule = false;
        for action in actions {
            match action {
                Action::RedrawNeeded { hover_only } => schedule |= self.redraw.request(hover_only),
                Action::SelectItem(item) => self.delegate.on_select_item(item.as_ref()),
                Action::DoubleActivateItem(item) => self.delegate.on_double_activate_item(item.as_ref()),
                Action::RightClickItem(item) => self.delegate.on_right_click_item(item.as_ref()),
            }
        }
        self.sync_tooltip();
        schedule
    }

    fn sync_tooltip(&mut self) {
        if self.tooltip.is_none() || !self.mounted {
            return;
        }
        let view = self.tooltip_view();
        if let Some(adapter) = self.tooltip.as_mut() {
            adapter.sync(view.as_ref());
        }
    }
}

/// Shared handle to a chart canvas, driving its frames.
///
/// Delegate callbacks run while the core is borrowed and must not call back
/// into this handle.
pub struct ChartCanvas<S, D, F>
where
    S: Surface + 'static,
    D: ChartDelegate<Context = S::Context> + 'static,
    F: FrameScheduler,
{
    core: Rc<RefCell<CanvasCore<S, D>>>,
    frames: F,
}

impl<S, D, F> ChartCanvas<S, D, F>
where
    S: Surface + 'static,
    D: ChartDelegate<Context = S::Context> + 'static,
    F: FrameScheduler,
{
    /// Create a canvas and schedule its first paint.
    #[must_use]
    pub fn new(surface: S, delegate: D, config: CanvasConfig, frames: F) -> Self {
        let canvas = Self {
            core: Rc::new(RefCell::new(CanvasCore::new(surface, delegate, config))),
            frames,
        };
        canvas.request_redraw();
        canvas
    }

    // --- Inputs ---

    pub fn on_pointer_down(&self, event: PointerEvent, button: Button) {
        let schedule = self.core.borrow_mut().on_pointer_down(event, button);
        self.schedule_if(schedule);
    }

    pub fn on_pointer_move(&self, event: PointerEvent) {
        let schedule = self.core.borrow_mut().on_pointer_move(event);
        self.schedule_if(schedule);
    }

    pub fn on_pointer_up(&self, event: PointerEvent, button: Button) {
        let schedule = self.core.borrow_mut().on_pointer_up(event, button);
        self.schedule_if(schedule);
    }

    pub fn on_pointer_leave(&self) {
        let schedule = self.core.borrow_mut().on_pointer_leave();
        self.schedule_if(schedule);
    }

    pub fn on_double_click(&self) {
        let schedule = self.core.borrow_mut().on_double_click();
        self.schedule_if(schedule);
    }

    /// Call after the delegate's underlying data changed.
    pub fn on_data_changed(&self) {
        let schedule = self.core.borrow_mut().on_data_changed();
        self.schedule_if(schedule);
    }

    pub fn set_config(&self, config: CanvasConfig) {
        let schedule = self.core.borrow_mut().set_config(config);
        self.schedule_if(schedule);
    }

    pub fn request_redraw(&self) {
        let schedule = self.core.borrow_mut().request_redraw();
        self.schedule_if(schedule);
    }

    pub fn set_tooltip_renderer(&self, renderer: Box<dyn TooltipRenderer<D::Tooltip>>) {
        self.core.borrow_mut().set_tooltip_renderer(renderer);
    }

    pub fn unmount(&self) {
        self.core.borrow_mut().unmount();
    }

    // --- Queries ---

    #[must_use]
    pub fn hovered_item(&self) -> Option<D::Item> {
        self.core.borrow().hovered_item().cloned()
    }

    #[must_use]
    pub fn tooltip_view(&self) -> Option<TooltipView<D::Tooltip>> {
        self.core.borrow().tooltip_view()
    }

    #[must_use]
    pub fn config(&self) -> CanvasConfig {
        self.core.borrow().config().clone()
    }

    #[must_use]
    pub fn paint_count(&self) -> u64 {
        self.core.borrow().paint_count()
    }

    /// Run `f` against the core, e.g. to reach the delegate.
    pub fn with_core<R>(&self, f: impl FnOnce(&mut CanvasCore<S, D>) -> R) -> R {
        f(&mut self.core.borrow_mut())
    }

    /// Paint synchronously, bypassing the frame cycle.
    ///
    /// # Errors
    ///
    /// Propagates any surface or delegate failure.
    pub fn paint_now(&self) -> Result<(), SurfaceError> {
        self.core.borrow_mut().paint_now()
    }

    fn schedule_if(&self, schedule: bool) {
        if !schedule {
            return;
        }
        let core: Weak<RefCell<CanvasCore<S, D>>> = Rc::downgrade(&self.core);
        self.frames.schedule_once(Box::new(move || {
            let Some(core) = core.upgrade() else {
                debug!("canvas: frame dropped, canvas gone");
                return;
            };
            if let Err(err) = core.borrow_mut().on_frame() {
                error!("canvas: paint failed: {err}");
            }
        }));
    }
}
