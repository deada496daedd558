//! Interactive terminal showcase.
//!
//! Elm-style split: `model` holds state, `update` is the pure reducer,
//! `layout` and `render` turn state into a frame, and `runtime` owns the
//! terminal, timers and side-effects.

#![allow(missing_docs)]

pub mod input;
pub mod layout;
pub mod model;
pub mod preferences;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod update;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod test_properties;

pub use runtime::{ShowcaseRuntimeConfig, open_uri, run_showcase};
