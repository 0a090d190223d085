#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_DEVICE_PIXEL_RATIO;

/// A point in CSS pixels, relative to either the canvas or the page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether `other` lies more than `threshold` away from `self` on either axis.
    #[must_use]
    pub fn exceeds(self, other: Point, threshold: f64) -> bool {
        (self.x - other.x).abs() > threshold || (self.y - other.y).abs() > threshold
    }
}

/// Layout size in logical (CSS) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether `pt` falls inside `[0, width] x [0, height]`.
    #[must_use]
    pub fn contains(self, pt: Point) -> bool {
        (0.0..=self.width).contains(&pt.x) && (0.0..=self.height).contains(&pt.y)
    }

    /// Backing-store size for this layout size at device pixel ratio `dpr`.
    ///
    /// Each axis is rounded to the nearest device pixel; negative and NaN
    /// products clamp to zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_physical(self, dpr: f64) -> PhysicalSize {
        let dpr = sanitize_ratio(dpr);
        let axis = |v: f64| {
            let scaled = (v * dpr).round();
            if scaled.is_nan() { 0 } else { scaled.clamp(0.0, f64::from(u32::MAX)) as u32 }
        };
        PhysicalSize { width: axis(self.width), height: axis(self.height) }
    }
}

/// Backing-store size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Replace a ratio that is not a positive finite number with the default.
#[must_use]
pub fn sanitize_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { DEFAULT_DEVICE_PIXEL_RATIO }
}
