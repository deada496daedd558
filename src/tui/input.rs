//! Key routing for the showcase runtime.
//!
//! Precedence: the modal overlay consumes every key while open, then
//! section-specific keys, then global keys. The Contact section treats
//! printable characters as text, so single-letter shortcuts are off there.

#![allow(missing_docs)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::model::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputContext {
    pub section: Section,
    pub modal_open: bool,
    /// Testimonial count, so digit keys only map to existing slides.
    pub slide_count: usize,
}

impl Default for InputContext {
    fn default() -> Self {
        Self {
            section: Section::Portfolio,
            modal_open: false,
            slide_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    CloseModal,
    NextSection,
    PrevSection,
    FilterNext,
    FilterPrev,
    SelectNext,
    SelectPrev,
    OpenSelected,
    ScrollDown,
    ScrollUp,
    SlideNext,
    SlidePrev,
    GotoSlide(usize),
    ToggleTheme,
    ToggleAutoplay,
    FieldNext,
    FieldPrev,
    TypeChar(char),
    Backspace,
    SubmitContact,
    LeaveContact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputResolution {
    pub action: Option<InputAction>,
    pub consumed: bool,
}

impl InputResolution {
    const fn action(action: InputAction) -> Self {
        Self {
            action: Some(action),
            consumed: true,
        }
    }

    const fn consumed_without_action() -> Self {
        Self {
            action: None,
            consumed: true,
        }
    }

    const fn passthrough() -> Self {
        Self {
            action: None,
            consumed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Resolve a key event using deterministic precedence rules.
#[must_use]
pub fn resolve_key_event(key: &KeyEvent, context: InputContext) -> InputResolution {
    if is_ctrl_c(key) {
        return InputResolution::action(InputAction::Quit);
    }
    if context.modal_open {
        return resolve_modal_key(key);
    }
    let section = match context.section {
        Section::Portfolio => resolve_portfolio_key(key),
        Section::Testimonials => resolve_testimonial_key(key, context.slide_count),
        Section::Contact => resolve_contact_key(key),
    };
    if section.consumed {
        return section;
    }
    resolve_global_key(key, context.section)
}

/// Footer hints for the current context.
#[must_use]
pub fn contextual_help(context: InputContext) -> &'static [HelpBinding] {
    if context.modal_open {
        return &MODAL_HELP;
    }
    match context.section {
        Section::Portfolio => &PORTFOLIO_HELP,
        Section::Testimonials => &TESTIMONIAL_HELP,
        Section::Contact => &CONTACT_HELP,
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn resolve_modal_key(key: &KeyEvent) -> InputResolution {
    match key.code {
        KeyCode::Esc | KeyCode::Char('x') => InputResolution::action(InputAction::CloseModal),
        _ => InputResolution::consumed_without_action(),
    }
}

fn resolve_portfolio_key(key: &KeyEvent) -> InputResolution {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => InputResolution::action(InputAction::FilterPrev),
        KeyCode::Right | KeyCode::Char('l') => InputResolution::action(InputAction::FilterNext),
        KeyCode::Down | KeyCode::Char('j') => InputResolution::action(InputAction::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => InputResolution::action(InputAction::SelectPrev),
        KeyCode::PageDown => InputResolution::action(InputAction::ScrollDown),
        KeyCode::PageUp => InputResolution::action(InputAction::ScrollUp),
        KeyCode::Enter => InputResolution::action(InputAction::OpenSelected),
        _ => InputResolution::passthrough(),
    }
}

fn resolve_testimonial_key(key: &KeyEvent, slide_count: usize) -> InputResolution {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => InputResolution::action(InputAction::SlidePrev),
        KeyCode::Right | KeyCode::Char('l') => InputResolution::action(InputAction::SlideNext),
        KeyCode::Char(c @ '1'..='9') => {
            let n = usize::from(c as u8 - b'1');
            if n < slide_count {
                InputResolution::action(InputAction::GotoSlide(n))
            } else {
                InputResolution::consumed_without_action()
            }
        }
        _ => InputResolution::passthrough(),
    }
}

fn resolve_contact_key(key: &KeyEvent) -> InputResolution {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Down => InputResolution::action(InputAction::FieldNext),
        KeyCode::Up => InputResolution::action(InputAction::FieldPrev),
        KeyCode::Backspace => InputResolution::action(InputAction::Backspace),
        KeyCode::Enter => InputResolution::action(InputAction::SubmitContact),
        KeyCode::Esc => InputResolution::action(InputAction::LeaveContact),
        KeyCode::Char(c) if !ctrl => InputResolution::action(InputAction::TypeChar(c)),
        _ => InputResolution::passthrough(),
    }
}

fn resolve_global_key(key: &KeyEvent, section: Section) -> InputResolution {
    let letters = section != Section::Contact;
    match key.code {
        KeyCode::Tab => InputResolution::action(InputAction::NextSection),
        KeyCode::BackTab => InputResolution::action(InputAction::PrevSection),
        KeyCode::Char(']') if letters => InputResolution::action(InputAction::NextSection),
        KeyCode::Char('[') if letters => InputResolution::action(InputAction::PrevSection),
        KeyCode::Char('q') if letters => InputResolution::action(InputAction::Quit),
        KeyCode::Char('t') if letters => InputResolution::action(InputAction::ToggleTheme),
        KeyCode::Char('p') if letters => InputResolution::action(InputAction::ToggleAutoplay),
        _ => InputResolution::passthrough(),
    }
}

const MODAL_HELP: [HelpBinding; 2] = [
    HelpBinding {
        keys: "Esc/x",
        description: "close",
    },
    HelpBinding {
        keys: "click outside",
        description: "close",
    },
];

const PORTFOLIO_HELP: [HelpBinding; 6] = [
    HelpBinding {
        keys: "←/→",
        description: "filter",
    },
    HelpBinding {
        keys: "↑/↓",
        description: "select",
    },
    HelpBinding {
        keys: "Enter",
        description: "details",
    },
    HelpBinding {
        keys: "Tab",
        description: "section",
    },
    HelpBinding {
        keys: "t",
        description: "theme",
    },
    HelpBinding {
        keys: "q",
        description: "quit",
    },
];

const TESTIMONIAL_HELP: [HelpBinding; 6] = [
    HelpBinding {
        keys: "←/→",
        description: "slide",
    },
    HelpBinding {
        keys: "1-9",
        description: "jump",
    },
    HelpBinding {
        keys: "p",
        description: "autoplay",
    },
    HelpBinding {
        keys: "Tab",
        description: "section",
    },
    HelpBinding {
        keys: "t",
        description: "theme",
    },
    HelpBinding {
        keys: "q",
        description: "quit",
    },
];

const CONTACT_HELP: [HelpBinding; 5] = [
    HelpBinding {
        keys: "↑/↓",
        description: "field",
    },
    HelpBinding {
        keys: "Enter",
        description: "send",
    },
    HelpBinding {
        keys: "Esc",
        description: "back",
    },
    HelpBinding {
        keys: "Tab",
        description: "section",
    },
    HelpBinding {
        keys: "Ctrl-C",
        description: "quit",
    },
];
