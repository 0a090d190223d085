//! Interactive canvas surface for chart-like visualizations.
//!
//! This crate is compiled to WebAssembly and runs in the browser, but all of
//! its state lives behind small traits so it can be driven headlessly in
//! tests. It owns the lifecycle of a chart canvas: keeping the backing store in
//! sync with the container size and device pixel ratio, translating pointer
//! events into hover/selection changes through a caller-supplied hit-test,
//! coalescing redraws to one paint per display refresh, and surfacing a
//! tooltip for the hovered item. What a chart draws, and what its items mean,
//! stays with the caller's [`delegate::ChartDelegate`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::ChartCanvas`] handle and testable [`engine::CanvasCore`] |
//! | [`delegate`] | Caller capabilities: hit-test, paint, tooltip info, callbacks |
//! | [`surface`] | Backing-store sizing, density rescale, and paint |
//! | [`scheduler`] | Frame scheduling and redraw coalescing |
//! | [`input`] | Pointer events and the hover/click state machine |
//! | [`hover`] | Shallow record equality for recomputed hover descriptors |
//! | [`tooltip`] | Tooltip suppression and placement |
//! | [`config`] | Host-supplied canvas configuration |
//! | [`geom`] | Points and logical/physical sizes |
//! | [`error`] | Surface and drawing errors |
//! | [`web`] | Browser bindings (`HtmlCanvasElement`, `requestAnimationFrame`, DOM tooltip) |
//! | [`consts`] | Shared numeric constants |

pub mod config;
pub mod consts;
pub mod delegate;
pub mod engine;
pub mod error;
pub mod geom;
pub mod hover;
pub mod input;
pub mod scheduler;
pub mod surface;
pub mod tooltip;
pub mod web;
