//! Elm-style state model for the interactive showcase.
//!
//! All display state lives in [`ShowcaseModel`]. Terminal and timer events
//! arrive as [`ShowcaseMsg`] values; side-effects are [`ShowcaseCmd`] values
//! returned from `update`. No I/O happens here.

use std::time::Duration;

use crossterm::event::{KeyEvent, MouseEvent};

use crate::core::config::ContactConfig;
use crate::logger::jsonl::LogEntry;
use crate::showcase::carousel::Carousel;
use crate::showcase::catalog::ProjectCatalog;
use crate::showcase::contact::{ContactForm, FieldKind, MailtoLink};
use crate::showcase::content::{ShowcaseContent, Testimonial};
use crate::showcase::filter::{FilterState, PortfolioItem};
use crate::showcase::modal::ModalPresenter;
use crate::tui::theme::ThemeMode;

// ──────────────────── sections ────────────────────

/// Page sections, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    /// Filterable project grid.
    #[default]
    Portfolio,
    /// Testimonial carousel.
    Testimonials,
    /// Contact form.
    Contact,
}

impl Section {
    /// Every section in tab order.
    pub const ALL: [Self; 3] = [Self::Portfolio, Self::Testimonials, Self::Contact];

    /// Tab caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Portfolio => "Portfolio",
            Self::Testimonials => "Testimonials",
            Self::Contact => "Contact",
        }
    }

    /// Next section, wrapping Contact → Portfolio.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Portfolio => Self::Testimonials,
            Self::Testimonials => Self::Contact,
            Self::Contact => Self::Portfolio,
        }
    }

    /// Previous section, wrapping Portfolio → Contact.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Portfolio => Self::Contact,
            Self::Testimonials => Self::Portfolio,
            Self::Contact => Self::Testimonials,
        }
    }
}

// ──────────────────── notifications ────────────────────

/// A transient toast shown above the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic ID for expiry tracking.
    pub id: u64,
    /// Severity level.
    pub level: NotificationLevel,
    /// Message text.
    pub message: String,
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Informational.
    Info,
    /// Degraded but working.
    Warning,
    /// Something failed.
    Error,
}

/// Maximum simultaneously visible notifications.
const MAX_NOTIFICATIONS: usize = 3;

/// How long a notification stays up.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

// ──────────────────── model ────────────────────

/// Complete display state for the showcase.
///
/// The update function mutates it; the render function reads it immutably.
#[derive(Debug, Clone)]
pub struct ShowcaseModel {
    /// Active section.
    pub section: Section,
    /// Portfolio filter and grid items.
    pub filter: FilterState,
    /// Detail records for the modal.
    pub catalog: ProjectCatalog,
    /// The single project modal.
    pub modal: ModalPresenter,
    /// Testimonial slider index.
    pub carousel: Carousel,
    /// Slide contents.
    pub testimonials: Vec<Testimonial>,
    /// Contact form values and markers.
    pub contact: ContactForm,
    /// Field receiving typed characters.
    pub contact_focus: FieldKind,
    /// Recipient and subject prefix for `mailto:` links.
    pub contact_target: ContactConfig,
    /// Most recently composed link, shown under the form.
    pub last_mailto: Option<MailtoLink>,
    /// Active color scheme.
    pub theme: ThemeMode,
    /// Cursor into the *visible* portfolio cards.
    pub selected: usize,
    /// First visible card row of the portfolio list.
    pub scroll: usize,
    /// Whether autoplay should be running.
    pub autoplay: bool,
    /// Terminal dimensions (columns, rows).
    pub terminal_size: (u16, u16),
    /// Active notifications (oldest first, max [`MAX_NOTIFICATIONS`]).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    pub next_notification_id: u64,
    /// Set once the user asked to quit.
    pub quit: bool,
}

impl ShowcaseModel {
    /// Build the initial model from loaded content.
    #[must_use]
    pub fn new(
        content: ShowcaseContent,
        contact_target: ContactConfig,
        theme: ThemeMode,
        autoplay: bool,
        terminal_size: (u16, u16),
    ) -> Self {
        let ShowcaseContent {
            catalog,
            items,
            testimonials,
        } = content;
        Self {
            section: Section::default(),
            filter: FilterState::new(items),
            catalog,
            modal: ModalPresenter::new(),
            carousel: Carousel::new(testimonials.len()),
            testimonials,
            contact: ContactForm::new(),
            contact_focus: FieldKind::Name,
            contact_target,
            last_mailto: None,
            theme,
            selected: 0,
            scroll: 0,
            autoplay,
            terminal_size,
            notifications: Vec::new(),
            next_notification_id: 0,
            quit: false,
        }
    }

    /// Push a notification, evicting the oldest if at capacity.
    /// Returns the assigned notification ID.
    pub fn push_notification(&mut self, level: NotificationLevel, message: String) -> u64 {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.push(Notification { id, level, message });
        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
        id
    }

    /// The card under the cursor, if any card is visible.
    #[must_use]
    pub fn selected_item(&self) -> Option<&PortfolioItem> {
        self.filter.visible_items().nth(self.selected)
    }

    /// Keep the cursor inside the visible list after a filter change.
    pub fn clamp_selection(&mut self) {
        let visible = self.filter.visible_count();
        if visible == 0 {
            self.selected = 0;
            self.scroll = 0;
        } else if self.selected >= visible {
            self.selected = visible - 1;
        }
        if self.scroll > self.selected {
            self.scroll = self.selected;
        }
    }

    /// Scroll just enough that the cursor row is inside a window of
    /// `capacity` rows.
    pub fn reveal_selection(&mut self, capacity: usize) {
        if capacity == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + capacity {
            self.scroll = self.selected + 1 - capacity;
        }
    }

    /// Highest useful scroll offset for a window of `capacity` rows.
    #[must_use]
    pub fn max_scroll(&self, capacity: usize) -> usize {
        self.filter.visible_count().saturating_sub(capacity)
    }
}

// ──────────────────── messages ────────────────────

/// Inputs to the update function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowcaseMsg {
    /// Terminal key press.
    Key(KeyEvent),
    /// Terminal mouse event.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize { cols: u16, rows: u16 },
    /// One autoplay period elapsed.
    AutoplayTick,
    /// A notification's display time ran out.
    NotificationExpired(u64),
    /// A runtime side-effect failed; surface it to the user.
    Error(String),
}

// ──────────────────── commands ────────────────────

/// Side-effects for the runtime to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum ShowcaseCmd {
    /// No side-effect.
    None,
    /// Leave the event loop.
    Quit,
    /// Execute multiple commands in order.
    Batch(Vec<Self>),
    /// Append an entry to the activity log.
    Log(LogEntry),
    /// Persist the theme preference.
    SavePreferences(ThemeMode),
    /// Start (`true`) or stop (`false`) the autoplay timer.
    SetAutoplay(bool),
    /// Hand a composed link to the system mail client.
    ComposeMail(MailtoLink),
    /// Deliver `NotificationExpired(id)` after the given delay.
    ScheduleNotificationExpiry { id: u64, after: Duration },
}

impl ShowcaseCmd {
    /// Flatten nested batches and drop `None`s; handy for assertions.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(cmds) => cmds.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

// ──────────────────── tests ────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showcase::filter::FilterTag;

    fn test_model() -> ShowcaseModel {
        ShowcaseModel::new(
            ShowcaseContent::builtin(),
            ContactConfig::default(),
            ThemeMode::Dark,
            true,
            (100, 30),
        )
    }

    #[test]
    fn sections_cycle_both_ways() {
        for section in Section::ALL {
            assert_eq!(section.next().prev(), section);
        }
        assert_eq!(Section::Contact.next(), Section::Portfolio);
    }

    #[test]
    fn new_model_starts_on_portfolio_with_everything_visible() {
        let model = test_model();
        assert_eq!(model.section, Section::Portfolio);
        assert_eq!(model.filter.visible_count(), 6);
        assert_eq!(model.carousel.slide_count(), 3);
        assert!(!model.modal.is_open());
        assert_eq!(
            model.selected_item().map(|i| i.project_id.as_str()),
            Some("project1")
        );
    }

    #[test]
    fn notifications_are_capped() {
        let mut model = test_model();
        for i in 0..5 {
            model.push_notification(NotificationLevel::Info, format!("n{i}"));
        }
        assert_eq!(model.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(model.notifications[0].message, "n2");
        assert_eq!(model.next_notification_id, 5);
    }

    #[test]
    fn clamp_after_narrow_filter() {
        let mut model = test_model();
        model.selected = 5;
        model.scroll = 3;
        model.filter.set_filter(FilterTag::parse("ai"));
        model.clamp_selection();
        assert_eq!(model.selected, 0);
        assert_eq!(model.scroll, 0);
        assert_eq!(
            model.selected_item().map(|i| i.project_id.as_str()),
            Some("project3")
        );
    }

    #[test]
    fn reveal_scrolls_minimally() {
        let mut model = test_model();
        model.selected = 4;
        model.reveal_selection(3);
        assert_eq!(model.scroll, 2);
        model.selected = 1;
        model.reveal_selection(3);
        assert_eq!(model.scroll, 1);
        assert_eq!(model.max_scroll(3), 3);
    }

    #[test]
    fn flatten_drops_none_and_nesting() {
        let cmd = ShowcaseCmd::Batch(vec![
            ShowcaseCmd::None,
            ShowcaseCmd::Batch(vec![ShowcaseCmd::Quit]),
            ShowcaseCmd::SetAutoplay(false),
        ]);
        assert_eq!(
            cmd.flatten(),
            vec![ShowcaseCmd::Quit, ShowcaseCmd::SetAutoplay(false)]
        );
    }
}
