//! Project detail modal: a two-state machine over the project catalog.
//!
//! ```text
//! Closed --open(known)--> Open        Open --open(known')--> Open (replaced)
//! Closed --open(unknown)--> Closed    Open --open(unknown)--> Open (unchanged)
//! Open --close()--> Closed            Closed --close()--> Closed
//! ```
//!
//! While open, background scrolling is locked. `close` unlocks it
//! unconditionally.

#![allow(missing_docs)]

use crate::showcase::catalog::{ProjectCatalog, ProjectRecord};

/// Whether the page behind the modal may scroll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollLock {
    #[default]
    Free,
    Locked,
}

/// Modal lifecycle state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        project_id: String,
        record: ProjectRecord,
    },
}

/// What `open` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Closed → Open.
    Opened,
    /// Already open; content swapped for the new record.
    Replaced,
    /// Id not in the catalog; state untouched.
    NotFound,
}

/// The two buttons at the bottom of every project modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    LiveDemo,
    SourceCode,
}

impl ModalAction {
    pub const ALL: [Self; 2] = [Self::LiveDemo, Self::SourceCode];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LiveDemo => "View Live Demo",
            Self::SourceCode => "Source Code",
        }
    }
}

/// Render-ready modal body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView<'a> {
    pub project_id: &'a str,
    pub icon: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub technologies: &'a [String],
    pub features: &'a [String],
    pub achievements: &'a [String],
    pub actions: [ModalAction; 2],
}

/// Owns the single modal instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalPresenter {
    state: ModalState,
    background_scroll: ScrollLock,
}

impl ModalPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `project_id`'s record. Unknown ids leave everything as it was.
    pub fn open(&mut self, catalog: &ProjectCatalog, project_id: &str) -> OpenOutcome {
        let Some(record) = catalog.get(project_id) else {
            return OpenOutcome::NotFound;
        };
        let outcome = if self.is_open() {
            OpenOutcome::Replaced
        } else {
            OpenOutcome::Opened
        };
        self.state = ModalState::Open {
            project_id: project_id.to_string(),
            record: record.clone(),
        };
        self.background_scroll = ScrollLock::Locked;
        outcome
    }

    /// Hide the modal and release the scroll lock. Idempotent.
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
        self.background_scroll = ScrollLock::Free;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    #[must_use]
    pub const fn state(&self) -> &ModalState {
        &self.state
    }

    #[must_use]
    pub const fn background_scroll(&self) -> ScrollLock {
        self.background_scroll
    }

    #[must_use]
    pub fn open_project_id(&self) -> Option<&str> {
        match &self.state {
            ModalState::Open { project_id, .. } => Some(project_id),
            ModalState::Closed => None,
        }
    }

    /// Project the open record into its display sections.
    #[must_use]
    pub fn view(&self) -> Option<ModalView<'_>> {
        match &self.state {
            ModalState::Closed => None,
            ModalState::Open { project_id, record } => Some(ModalView {
                project_id,
                icon: &record.icon,
                title: &record.title,
                description: &record.description,
                technologies: &record.technologies,
                features: &record.features,
                achievements: &record.achievements,
                actions: ModalAction::ALL,
            }),
        }
    }
}
