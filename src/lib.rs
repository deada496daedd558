#![forbid(unsafe_code)]

//! folio: a terminal portfolio showcase.
//!
//! Three interactive pieces over one content set:
//! 1. **Portfolio grid**: category filter controls over project cards
//! 2. **Project modal**: one detail overlay that locks background scrolling
//! 3. **Testimonial carousel**: wrap-around slider with optional autoplay
//!
//! plus a contact form that composes `mailto:` links.
//!
//! # Library usage
//!
//! Use the [`prelude`] for convenient access to the most common types:
//!
//! ```rust,no_run
//! use folio_showcase::prelude::*;
//! ```
//!
//! Individual modules can also be imported directly:
//!
//! ```rust,no_run
//! use folio_showcase::core::config::Config;
//! use folio_showcase::showcase::filter::{FilterState, FilterTag};
//! ```

pub mod prelude;

pub mod core;
pub mod logger;
pub mod showcase;
#[cfg(feature = "cli")]
pub mod tui;
