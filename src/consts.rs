//! Shared numeric constants for the chart canvas.

// ── Pointer ─────────────────────────────────────────────────────

/// Maximum pointer travel, in logical pixels on either axis, between press and
/// release for the gesture to still count as a click.
pub const CLICK_THRESHOLD_PX: f64 = 5.0;

// ── Density ─────────────────────────────────────────────────────

/// Device pixel ratio assumed before the first paint, and whenever the host
/// reports a ratio that is not a positive finite number.
pub const DEFAULT_DEVICE_PIXEL_RATIO: f64 = 1.0;

// ── Tooltip ─────────────────────────────────────────────────────

/// Gap between the pointer and the tooltip's nearest corner, in CSS pixels.
pub const TOOLTIP_MOUSE_OFFSET_PX: f64 = 11.0;

/// Class applied to the canvas element when the host does not pick one.
pub const DEFAULT_CANVAS_CLASS: &str = "chartCanvas";

/// Class applied to the DOM tooltip element.
pub const TOOLTIP_CLASS: &str = "tooltip";
