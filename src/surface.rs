//! Surface management: backing-store sizing, density rescale, and paint.
//!
//! A [`Surface`] is anything with a resizable device-pixel backing store that
//! can hand out a [`DrawingContext`]. [`SurfaceManager`] keeps that backing
//! store matched to `logical size x device pixel ratio` and, when drawing is
//! density-relative, keeps the context transform scaled so paint callbacks can
//! work in CSS pixels.
//!
//! The browser backend lives in [`crate::web`]; [`MemorySurface`] is a
//! headless backend that records what happened to it.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::consts::DEFAULT_DEVICE_PIXEL_RATIO;
use crate::error::SurfaceError;
use crate::geom::{LogicalSize, PhysicalSize, sanitize_ratio};

/// Transform operations the manager needs from a drawing context.
pub trait DrawingContext {
    /// Multiply the current transform by a uniform scale `factor`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the transform.
    fn scale(&self, factor: f64) -> Result<(), SurfaceError>;
}

/// A pixel-addressable drawing target.
pub trait Surface {
    type Context: DrawingContext;

    /// Whether the surface is still mounted. Detached surfaces are never drawn to.
    fn is_attached(&self) -> bool;

    /// Current device pixel ratio. Read fresh on every paint.
    fn device_pixel_ratio(&self) -> f64;

    /// Current backing-store size in device pixels.
    fn backing_size(&self) -> PhysicalSize;

    /// Reallocate the backing store at `physical` and display it at `logical`.
    ///
    /// Clears the pixels and resets every context transform to identity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend fails to apply the new size.
    fn reset_backing_store(&mut self, physical: PhysicalSize, logical: LogicalSize) -> Result<(), SurfaceError>;

    /// Create the 2D context. Called at most once per manager.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend cannot provide a context.
    fn create_context(&mut self) -> Result<Self::Context, SurfaceError>;

    /// Apply a style class to the surface element.
    fn set_class_name(&mut self, _class_name: &str) {}
}

/// Owns a [`Surface`] and its cached context.
pub struct SurfaceManager<S: Surface> {
    surface: S,
    context: Option<S::Context>,
    /// Ratio the current transform was built for.
    density: f64,
    density_relative: bool,
    /// Force the next resize to reallocate even if dimensions match.
    stale: bool,
}

impl<S: Surface> SurfaceManager<S> {
    #[must_use]
    pub fn new(surface: S, density_relative: bool) -> Self {
        Self {
            surface,
            context: None,
            density: DEFAULT_DEVICE_PIXEL_RATIO,
            density_relative,
            stale: false,
        }
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Device pixel ratio the current transform reflects.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    #[must_use]
    pub fn density_relative(&self) -> bool {
        self.density_relative
    }

    #[must_use]
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// Switch between density-relative and raw device-pixel drawing.
    ///
    /// The existing transform was built for the old mode, so the next resize
    /// reallocates the backing store to start over from identity.
    pub fn set_density_relative(&mut self, density_relative: bool) {
        if self.density_relative != density_relative {
            self.density_relative = density_relative;
            self.stale = true;
        }
    }

    /// Match the backing store to `logical` at the current device pixel ratio.
    ///
    /// Only reallocates when a physical dimension changed, since a reset wipes
    /// the pixels. Returns whether the backing store was reset.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the context cannot be created or the backend rejects
    /// the new size or transform.
    pub fn resize(&mut self, logical: LogicalSize) -> Result<bool, SurfaceError> {
        if !self.surface.is_attached() {
            debug!("surface: resize skipped, surface detached");
            return Ok(false);
        }
        self.ensure_context()?;

        let dpr = sanitize_ratio(self.surface.device_pixel_ratio());
        let physical = logical.to_physical(dpr);
        if !self.stale && physical == self.surface.backing_size() {
            return Ok(false);
        }

        debug!("surface: backing store {}x{} at dpr {dpr}", physical.width, physical.height);
        self.surface.reset_backing_store(physical, logical)?;
        self.stale = false;
        if self.density_relative && let Some(ctx) = self.context.as_ref() {
            ctx.scale(dpr)?;
        }
        self.density = dpr;
        Ok(true)
    }

    /// Rescale the transform if the device pixel ratio moved since the last
    /// paint, leaving the backing store alone.
    ///
    /// Returns whether the ratio changed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the transform.
    pub fn adjust_for_density_change(&mut self) -> Result<bool, SurfaceError> {
        if !self.surface.is_attached() {
            return Ok(false);
        }
        let dpr = sanitize_ratio(self.surface.device_pixel_ratio());
        if (dpr - self.density).abs() <= f64::EPSILON {
            return Ok(false);
        }

        debug!("surface: device pixel ratio {} -> {dpr}", self.density);
        if self.density_relative && let Some(ctx) = self.context.as_ref() {
            ctx.scale(dpr / self.density)?;
        }
        self.density = dpr;
        Ok(true)
    }

    /// Bring the surface up to date, then run `draw` against the context.
    ///
    /// `draw` receives the context and whether the previous pixels are gone
    /// (backing store reset or density rescaled), in which case it must draw
    /// everything. Returns whether `draw` ran.
    ///
    /// # Errors
    ///
    /// Propagates context, resize, and rescale failures, and any error `draw` returns.
    pub fn paint<F>(&mut self, logical: LogicalSize, draw: F) -> Result<bool, SurfaceError>
    where
        F: FnOnce(&S::Context, bool) -> Result<(), SurfaceError>,
    {
        if !self.surface.is_attached() {
            debug!("surface: paint skipped, surface detached");
            return Ok(false);
        }
        self.ensure_context()?;
        let reset = self.resize(logical)?;
        let rescaled = self.adjust_for_density_change()?;

        let Some(ctx) = self.context.as_ref() else {
            return Err(SurfaceError::ContextUnavailable);
        };
        draw(ctx, reset || rescaled)?;
        Ok(true)
    }

    fn ensure_context(&mut self) -> Result<(), SurfaceError> {
        if self.context.is_none() {
            self.context = Some(self.surface.create_context()?);
        }
        Ok(())
    }
}

// =============================================================
// Headless backend
// =============================================================

/// Observable state shared by a [`MemorySurface`] and its contexts.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryState {
    pub attached: bool,
    pub device_pixel_ratio: f64,
    pub backing: PhysicalSize,
    pub display: LogicalSize,
    pub class_name: String,
    /// Effective uniform scale of the context transform.
    pub scale: f64,
    /// Number of backing-store reallocations.
    pub resets: usize,
    /// Number of contexts created.
    pub contexts_created: usize,
}

/// Headless [`Surface`] for tests and offscreen use.
///
/// Clones share state, so a test can keep one handle to move the device pixel
/// ratio or detach the surface while the engine owns another.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    state: Rc<RefCell<MemoryState>>,
}

impl MemorySurface {
    #[must_use]
    pub fn new(device_pixel_ratio: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(MemoryState {
                attached: true,
                device_pixel_ratio,
                backing: PhysicalSize::default(),
                display: LogicalSize::default(),
                class_name: String::new(),
                scale: 1.0,
                resets: 0,
                contexts_created: 0,
            })),
        }
    }

    pub fn set_device_pixel_ratio(&self, dpr: f64) {
        self.state.borrow_mut().device_pixel_ratio = dpr;
    }

    pub fn set_attached(&self, attached: bool) {
        self.state.borrow_mut().attached = attached;
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> MemoryState {
        self.state.borrow().clone()
    }
}

impl Surface for MemorySurface {
    type Context = MemoryContext;

    fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.state.borrow().device_pixel_ratio
    }

    fn backing_size(&self) -> PhysicalSize {
        self.state.borrow().backing
    }

    fn reset_backing_store(&mut self, physical: PhysicalSize, logical: LogicalSize) -> Result<(), SurfaceError> {
        let mut state = self.state.borrow_mut();
        state.backing = physical;
        state.display = logical;
        state.scale = 1.0;
        state.resets += 1;
        Ok(())
    }

    fn create_context(&mut self) -> Result<Self::Context, SurfaceError> {
        self.state.borrow_mut().contexts_created += 1;
        Ok(MemoryContext { state: Rc::clone(&self.state) })
    }

    fn set_class_name(&mut self, class_name: &str) {
        class_name.clone_into(&mut self.state.borrow_mut().class_name);
    }
}

/// Drawing context of a [`MemorySurface`].
#[derive(Debug, Clone)]
pub struct MemoryContext {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryContext {
    /// Effective uniform scale of the transform.
    #[must_use]
    pub fn current_scale(&self) -> f64 {
        self.state.borrow().scale
    }
}

impl DrawingContext for MemoryContext {
    fn scale(&self, factor: f64) -> Result<(), SurfaceError> {
        self.state.borrow_mut().scale *= factor;
        Ok(())
    }
}
