//! Pure update function for the Elm-style showcase.
//!
//! `update()` takes the current model and a message, mutates the model, and
//! returns a command describing any side-effects the runtime should execute.
//! This module performs no I/O.

use crossterm::event::{KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::logger::jsonl::{EventType, LogEntry, Severity};
use crate::showcase::carousel::Navigation;
use crate::showcase::modal::{ModalAction, OpenOutcome, ScrollLock};

use super::input::{InputAction, InputContext, resolve_key_event};
use super::layout::{HitTarget, build_layout, hit_test};
use super::model::{
    NOTIFICATION_TTL, NotificationLevel, Section, ShowcaseCmd, ShowcaseModel, ShowcaseMsg,
};

const LOG_SOURCE: &str = "browse";

/// Apply a message to the model and return the next command for the runtime.
pub fn update(model: &mut ShowcaseModel, msg: ShowcaseMsg) -> ShowcaseCmd {
    match msg {
        ShowcaseMsg::Key(key) => {
            if key.kind == KeyEventKind::Release {
                return ShowcaseCmd::None;
            }
            let context = InputContext {
                section: model.section,
                modal_open: model.modal.is_open(),
                slide_count: model.carousel.slide_count(),
            };
            match resolve_key_event(&key, context).action {
                Some(action) => apply_input_action(model, action),
                None => ShowcaseCmd::None,
            }
        }

        ShowcaseMsg::Mouse(event) => handle_mouse_event(model, event),

        ShowcaseMsg::Resize { cols, rows } => {
            model.terminal_size = (cols, rows);
            let capacity = list_capacity(model);
            model.scroll = model.scroll.min(model.max_scroll(capacity));
            model.reveal_selection(capacity);
            ShowcaseCmd::None
        }

        ShowcaseMsg::AutoplayTick => {
            if model.autoplay {
                model.carousel.next();
            }
            ShowcaseCmd::None
        }

        ShowcaseMsg::NotificationExpired(id) => {
            model.notifications.retain(|n| n.id != id);
            ShowcaseCmd::None
        }

        ShowcaseMsg::Error(message) => {
            let mut entry = LogEntry::new(EventType::Error, Severity::Error).with_source(LOG_SOURCE);
            entry.error_message = Some(message.clone());
            ShowcaseCmd::Batch(vec![
                notify(model, NotificationLevel::Error, message),
                ShowcaseCmd::Log(entry),
            ])
        }
    }
}

fn apply_input_action(model: &mut ShowcaseModel, action: InputAction) -> ShowcaseCmd {
    match action {
        InputAction::Quit => {
            model.quit = true;
            ShowcaseCmd::Quit
        }
        InputAction::CloseModal => close_modal(model),
        InputAction::NextSection => {
            model.section = model.section.next();
            ShowcaseCmd::None
        }
        InputAction::PrevSection => {
            model.section = model.section.prev();
            ShowcaseCmd::None
        }
        InputAction::FilterNext => {
            model.filter.next_control();
            filter_changed(model)
        }
        InputAction::FilterPrev => {
            model.filter.prev_control();
            filter_changed(model)
        }
        InputAction::SelectNext => {
            if model.selected + 1 < model.filter.visible_count() {
                model.selected += 1;
            }
            let capacity = list_capacity(model);
            model.reveal_selection(capacity);
            ShowcaseCmd::None
        }
        InputAction::SelectPrev => {
            model.selected = model.selected.saturating_sub(1);
            let capacity = list_capacity(model);
            model.reveal_selection(capacity);
            ShowcaseCmd::None
        }
        InputAction::OpenSelected => open_selected(model),
        InputAction::ScrollDown => scroll_list(model, ScrollDirection::Down, list_capacity(model)),
        InputAction::ScrollUp => scroll_list(model, ScrollDirection::Up, list_capacity(model)),
        InputAction::SlideNext => {
            let nav = model.carousel.next();
            slide_changed(nav)
        }
        InputAction::SlidePrev => {
            let nav = model.carousel.prev();
            slide_changed(nav)
        }
        InputAction::GotoSlide(n) => {
            let nav = model.carousel.goto(n);
            slide_changed(nav)
        }
        InputAction::ToggleTheme => {
            model.theme = model.theme.toggle();
            let mut entry = LogEntry::info(EventType::ThemeChanged).with_source(LOG_SOURCE);
            entry.theme = Some(model.theme.label().to_string());
            ShowcaseCmd::Batch(vec![
                ShowcaseCmd::SavePreferences(model.theme),
                ShowcaseCmd::Log(entry),
            ])
        }
        InputAction::ToggleAutoplay => {
            model.autoplay = !model.autoplay;
            let state = if model.autoplay { "on" } else { "off" };
            ShowcaseCmd::Batch(vec![
                ShowcaseCmd::SetAutoplay(model.autoplay),
                notify(model, NotificationLevel::Info, format!("Autoplay {state}")),
            ])
        }
        InputAction::FieldNext => {
            model.contact_focus = model.contact_focus.next();
            ShowcaseCmd::None
        }
        InputAction::FieldPrev => {
            model.contact_focus = model.contact_focus.prev();
            ShowcaseCmd::None
        }
        InputAction::TypeChar(c) => {
            model.contact.push_char(model.contact_focus, c);
            ShowcaseCmd::None
        }
        InputAction::Backspace => {
            model.contact.pop_char(model.contact_focus);
            ShowcaseCmd::None
        }
        InputAction::SubmitContact => submit_contact(model),
        InputAction::LeaveContact => {
            model.section = Section::Portfolio;
            ShowcaseCmd::None
        }
    }
}

fn handle_mouse_event(model: &mut ShowcaseModel, event: MouseEvent) -> ShowcaseCmd {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = build_layout(model);
            match hit_test(&layout, event.column, event.row) {
                Some(target) => click(model, target),
                None => ShowcaseCmd::None,
            }
        }
        MouseEventKind::ScrollDown => {
            scroll_list(model, ScrollDirection::Down, 1)
        }
        MouseEventKind::ScrollUp => scroll_list(model, ScrollDirection::Up, 1),
        _ => ShowcaseCmd::None,
    }
}

fn click(model: &mut ShowcaseModel, target: HitTarget) -> ShowcaseCmd {
    match target {
        HitTarget::ModalClose | HitTarget::ModalBackdrop => close_modal(model),
        HitTarget::ModalBody => ShowcaseCmd::None,
        HitTarget::ModalButton(action) => {
            let message = match action {
                ModalAction::LiveDemo => "No live demo is linked for this project",
                ModalAction::SourceCode => "No source repository is linked for this project",
            };
            notify(model, NotificationLevel::Info, message.to_string())
        }
        HitTarget::Tab(section) => {
            model.section = section;
            ShowcaseCmd::None
        }
        HitTarget::FilterButton(index) => {
            model.filter.select_control(index);
            filter_changed(model)
        }
        HitTarget::Card(index) => {
            model.selected = index;
            open_selected(model)
        }
        HitTarget::PrevArrow => {
            let nav = model.carousel.prev();
            slide_changed(nav)
        }
        HitTarget::NextArrow => {
            let nav = model.carousel.next();
            slide_changed(nav)
        }
        HitTarget::Indicator(n) => {
            let nav = model.carousel.goto(n);
            slide_changed(nav)
        }
        HitTarget::Field(kind) => {
            model.contact_focus = kind;
            ShowcaseCmd::None
        }
        HitTarget::Submit => submit_contact(model),
    }
}

// ──────────────────── helpers ────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollDirection {
    Up,
    Down,
}

fn list_capacity(model: &ShowcaseModel) -> usize {
    build_layout(model).list.map_or(0, |list| list.capacity)
}

/// Move the card window. Refused while the modal holds the scroll lock.
fn scroll_list(model: &mut ShowcaseModel, direction: ScrollDirection, step: usize) -> ShowcaseCmd {
    if model.modal.background_scroll() == ScrollLock::Locked || model.section != Section::Portfolio
    {
        return ShowcaseCmd::None;
    }
    let capacity = list_capacity(model);
    model.scroll = match direction {
        ScrollDirection::Down => (model.scroll + step.max(1)).min(model.max_scroll(capacity)),
        ScrollDirection::Up => model.scroll.saturating_sub(step.max(1)),
    };
    if capacity > 0 {
        let last_in_window = model.scroll + capacity - 1;
        model.selected = model.selected.clamp(model.scroll, last_in_window.max(model.scroll));
        model.clamp_selection();
    }
    ShowcaseCmd::None
}

fn filter_changed(model: &mut ShowcaseModel) -> ShowcaseCmd {
    model.clamp_selection();
    let capacity = list_capacity(model);
    model.reveal_selection(capacity);
    let mut entry = LogEntry::info(EventType::FilterChanged).with_source(LOG_SOURCE);
    entry.filter = Some(model.filter.active_filter().to_string());
    entry.count = Some(model.filter.visible_count());
    ShowcaseCmd::Log(entry)
}

fn open_selected(model: &mut ShowcaseModel) -> ShowcaseCmd {
    let Some(project_id) = model.selected_item().map(|item| item.project_id.clone()) else {
        return ShowcaseCmd::None;
    };
    let outcome = model.modal.open(&model.catalog, &project_id);
    let entry = match outcome {
        OpenOutcome::Opened | OpenOutcome::Replaced => {
            LogEntry::info(EventType::ModalOpened)
        }
        OpenOutcome::NotFound => LogEntry::new(EventType::ModalIgnored, Severity::Warning)
            .with_details("no catalog record for card"),
    };
    let mut entry = entry.with_source(LOG_SOURCE);
    entry.project_id = Some(project_id);
    ShowcaseCmd::Log(entry)
}

fn close_modal(model: &mut ShowcaseModel) -> ShowcaseCmd {
    let closed = model.modal.open_project_id().map(str::to_string);
    model.modal.close();
    match closed {
        Some(project_id) => {
            let mut entry = LogEntry::info(EventType::ModalClosed).with_source(LOG_SOURCE);
            entry.project_id = Some(project_id);
            ShowcaseCmd::Log(entry)
        }
        None => ShowcaseCmd::None,
    }
}

fn slide_changed(nav: Navigation) -> ShowcaseCmd {
    match nav {
        Navigation::Moved { to, .. } => {
            let mut entry = LogEntry::info(EventType::SlideChanged).with_source(LOG_SOURCE);
            entry.slide = Some(to);
            ShowcaseCmd::Log(entry)
        }
        Navigation::Empty => ShowcaseCmd::None,
    }
}

fn submit_contact(model: &mut ShowcaseModel) -> ShowcaseCmd {
    match model.contact.submit(&model.contact_target) {
        Ok(link) => {
            model.last_mailto = Some(link.clone());
            model.contact_focus = crate::showcase::contact::FieldKind::Name;
            let entry = LogEntry::info(EventType::ContactPrepared)
                .with_source(LOG_SOURCE)
                .with_details(link.recipient.clone());
            ShowcaseCmd::Batch(vec![
                ShowcaseCmd::Log(entry),
                ShowcaseCmd::ComposeMail(link),
                notify(
                    model,
                    NotificationLevel::Info,
                    "Message ready; handing off to your mail client".to_string(),
                ),
            ])
        }
        Err(failures) => {
            if let Some((first, _)) = failures.first() {
                model.contact_focus = *first;
            }
            let mut entry = LogEntry::new(EventType::ContactRejected, Severity::Warning)
                .with_source(LOG_SOURCE);
            entry.count = Some(failures.len());
            let noun = if failures.len() == 1 { "field needs" } else { "fields need" };
            ShowcaseCmd::Batch(vec![
                ShowcaseCmd::Log(entry),
                notify(
                    model,
                    NotificationLevel::Warning,
                    format!("{} {noun} attention", failures.len()),
                ),
            ])
        }
    }
}

fn notify(model: &mut ShowcaseModel, level: NotificationLevel, message: String) -> ShowcaseCmd {
    let id = model.push_notification(level, message);
    ShowcaseCmd::ScheduleNotificationExpiry {
        id,
        after: NOTIFICATION_TTL,
    }
}

// ──────────────────── tests ────────────────────
