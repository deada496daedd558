//! Headless showcase harness for automated keyflow tests.
//!
//! Drives the model/update/render pipeline without a real terminal,
//! capturing the rendered text and the commands after each step.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut h = ShowcaseHarness::default();
//! h.inject_key(KeyCode::Enter);
//! assert!(h.last_frame().contains("Technologies"));
//! ```

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::layout::{HitTarget, build_layout};
use super::model::{ShowcaseCmd, ShowcaseModel, ShowcaseMsg};
use super::render::render_frame;
use super::theme::ThemeMode;
use super::update::update;
use crate::core::config::ContactConfig;
use crate::logger::jsonl::EventType;
use crate::showcase::content::ShowcaseContent;

/// Scriptable input step for deterministic replay.
#[derive(Debug, Clone)]
pub enum HarnessStep {
    Key(KeyCode),
    Type(&'static str),
    Click(HitTarget),
    Tick,
    Resize { cols: u16, rows: u16 },
}

pub struct ShowcaseHarness {
    model: ShowcaseModel,
    frames: Vec<String>,
    commands: Vec<ShowcaseCmd>,
}

impl Default for ShowcaseHarness {
    fn default() -> Self {
        Self::new(ShowcaseContent::builtin(), (100, 30))
    }
}

impl ShowcaseHarness {
    pub fn new(content: ShowcaseContent, size: (u16, u16)) -> Self {
        let mut harness = Self {
            model: ShowcaseModel::new(
                content,
                ContactConfig::default(),
                ThemeMode::Dark,
                true,
                size,
            ),
            frames: Vec::new(),
            commands: Vec::new(),
        };
        harness.snapshot();
        harness
    }

    pub fn model(&self) -> &ShowcaseModel {
        &self.model
    }

    pub fn last_frame(&self) -> &str {
        self.frames.last().map_or("", String::as_str)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Every command returned so far, flattened.
    pub fn commands(&self) -> &[ShowcaseCmd] {
        &self.commands
    }

    /// Events of every `Log` command returned so far.
    pub fn logged_events(&self) -> Vec<EventType> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                ShowcaseCmd::Log(entry) => Some(entry.event),
                _ => None,
            })
            .collect()
    }

    pub fn inject_key(&mut self, code: KeyCode) {
        self.send(ShowcaseMsg::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.inject_key(KeyCode::Char(ch));
        }
    }

    /// Left-click the top-left cell of `target`. Panics if it is not on screen.
    pub fn click(&mut self, target: HitTarget) {
        let rect = build_layout(&self.model)
            .rect_of(target)
            .unwrap_or_else(|| panic!("{target:?} is not clickable right now"));
        self.click_at(rect.col, rect.row);
    }

    pub fn click_at(&mut self, column: u16, row: u16) {
        self.send(ShowcaseMsg::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }));
    }

    pub fn run(&mut self, steps: &[HarnessStep]) {
        for step in steps {
            match step {
                HarnessStep::Key(code) => self.inject_key(*code),
                HarnessStep::Type(text) => self.type_text(text),
                HarnessStep::Click(target) => self.click(*target),
                HarnessStep::Tick => self.send(ShowcaseMsg::AutoplayTick),
                HarnessStep::Resize { cols, rows } => self.send(ShowcaseMsg::Resize {
                    cols: *cols,
                    rows: *rows,
                }),
            }
        }
    }

    pub fn send(&mut self, msg: ShowcaseMsg) {
        let cmd = update(&mut self.model, msg);
        self.commands.extend(cmd.flatten());
        self.snapshot();
    }

    fn snapshot(&mut self) {
        let layout = build_layout(&self.model);
        self.frames
            .push(render_frame(&self.model, &layout).to_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showcase::contact::FieldKind;
    use crate::tui::model::Section;

    #[test]
    fn browse_filter_open_close() {
        let mut h = ShowcaseHarness::default();
        h.run(&[
            HarnessStep::Click(HitTarget::FilterButton(2)),
            HarnessStep::Key(KeyCode::Enter),
        ]);
        assert!(h.last_frame().contains("Key features"));
        assert!(h.model().modal.is_open());

        h.inject_key(KeyCode::Esc);
        assert!(!h.last_frame().contains("Key features"));
        assert_eq!(
            h.logged_events(),
            vec![
                EventType::FilterChanged,
                EventType::ModalOpened,
                EventType::ModalClosed
            ]
        );
    }

    #[test]
    fn opening_a_second_card_replaces_the_first() {
        let mut h = ShowcaseHarness::default();
        h.inject_key(KeyCode::Enter);
        let first_title = h.model().modal.view().map(|v| v.title.to_string());
        h.click_at(0, 0);
        h.inject_key(KeyCode::Down);
        h.inject_key(KeyCode::Enter);
        let second_title = h.model().modal.view().map(|v| v.title.to_string());
        assert_ne!(first_title, second_title);
        assert_eq!(h.model().modal.open_project_id(), Some("project2"));
    }

    #[test]
    fn autoplay_and_manual_navigation_share_one_index() {
        let mut h = ShowcaseHarness::default();
        h.run(&[
            HarnessStep::Click(HitTarget::Tab(Section::Testimonials)),
            HarnessStep::Tick,
            HarnessStep::Tick,
            HarnessStep::Click(HitTarget::NextArrow),
        ]);
        assert_eq!(h.model().carousel.index(), 0);
        assert!(h.last_frame().contains("● ○ ○"));
    }

    #[test]
    fn contact_flow_composes_mailto() {
        let mut h = ShowcaseHarness::default();
        h.run(&[
            HarnessStep::Click(HitTarget::Tab(Section::Contact)),
            HarnessStep::Click(HitTarget::Field(FieldKind::Name)),
            HarnessStep::Type("Ada Lovelace"),
            HarnessStep::Click(HitTarget::Field(FieldKind::Email)),
            HarnessStep::Type("ada@example.com"),
            HarnessStep::Click(HitTarget::Field(FieldKind::Subject)),
            HarnessStep::Type("Engines"),
            HarnessStep::Click(HitTarget::Field(FieldKind::Message)),
            HarnessStep::Type("Shall we compute Bernoulli numbers?"),
            HarnessStep::Click(HitTarget::Submit),
        ]);
        assert!(
            h.commands()
                .iter()
                .any(|cmd| matches!(cmd, ShowcaseCmd::ComposeMail(_)))
        );
        assert!(h.last_frame().contains("Last draft: mailto:hello@example.com"));
    }

    #[test]
    fn shrinking_terminal_shows_warning_then_recovers() {
        let mut h = ShowcaseHarness::default();
        h.run(&[HarnessStep::Resize { cols: 30, rows: 10 }]);
        assert!(h.last_frame().contains("Terminal too small"));
        h.run(&[HarnessStep::Resize { cols: 90, rows: 24 }]);
        assert!(h.last_frame().contains("Featured work"));
        assert_eq!(h.frame_count(), 3);
    }
}
