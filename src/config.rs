//! Host-supplied configuration for a chart canvas.
//!
//! Hosts usually rebuild this on every layout pass and hand it back through
//! [`crate::engine::ChartCanvas::set_config`]. Any new config forces a full
//! repaint, since drawing may depend on fields the engine never reads.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_CANVAS_CLASS;
use crate::geom::LogicalSize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Container width in CSS pixels.
    pub container_width: f64,
    /// Container height in CSS pixels.
    pub container_height: f64,
    /// Pre-scale the drawing transform by the device pixel ratio, so paint
    /// callbacks draw in CSS pixels. When off, callbacks work in raw device pixels.
    pub density_relative: bool,
    /// An ancestor gesture is dragging the chart; hides the tooltip.
    pub dragging: bool,
    /// Class applied to the canvas element.
    pub class_name: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            container_width: 0.0,
            container_height: 0.0,
            density_relative: true,
            dragging: false,
            class_name: DEFAULT_CANVAS_CLASS.to_owned(),
        }
    }
}

impl CanvasConfig {
    #[must_use]
    pub fn new(container_width: f64, container_height: f64) -> Self {
        Self { container_width, container_height, ..Self::default() }
    }

    /// Parse a config from host JSON props. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `json` is malformed or a field has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn logical_size(&self) -> LogicalSize {
        LogicalSize::new(self.container_width, self.container_height)
    }

    #[must_use]
    pub fn with_dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }

    #[must_use]
    pub fn with_density_relative(mut self, density_relative: bool) -> Self {
        self.density_relative = density_relative;
        self
    }
}
