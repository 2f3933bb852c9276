//! # lesson-fx
//!
//! Cosmetic page effects for lesson pages, compiled to WebAssembly:
//! scroll-reveal setup, card hover tracking, button ripples, tooltips, a
//! clipboard copy helper, scroll parallax and a typewriter reveal.
//!
//! Everything outside [`frontend`] is plain Rust and builds on any target;
//! `frontend` binds it to the DOM and only exists on `wasm32`.

pub mod attrs;
pub mod clipboard;
pub mod config;
pub mod geometry;
pub mod hover;
pub mod log;
pub mod parallax;
pub mod ripple;
pub mod scroll_reveal;
pub mod timer;
pub mod tooltip;
pub mod typewriter;

#[cfg(target_arch = "wasm32")]
pub mod frontend;
