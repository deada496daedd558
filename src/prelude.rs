//! Convenience re-exports for library consumers.
//!
//! ```rust,no_run
//! use folio_showcase::prelude::*;
//! ```

// Core
pub use crate::core::config::Config;
pub use crate::core::errors::{FolioError, Result};

// Showcase state
pub use crate::showcase::autoplay::AutoplayTimer;
pub use crate::showcase::carousel::{Carousel, Navigation};
pub use crate::showcase::catalog::{ProjectCatalog, ProjectRecord};
pub use crate::showcase::contact::{ContactForm, FieldKind, MailtoLink};
pub use crate::showcase::content::{ShowcaseContent, Testimonial};
pub use crate::showcase::filter::{FilterState, FilterTag, PortfolioItem};
pub use crate::showcase::modal::{ModalPresenter, OpenOutcome, ScrollLock};

// Logging
pub use crate::logger::jsonl::{EventType, JsonlConfig, JsonlWriter, LogEntry};
