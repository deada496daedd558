//! Contact form: per-field validation and `mailto:` handoff.
//!
//! Validation runs in a fixed order per field: required, email shape, then
//! minimum lengths. A field only carries a visible status once it has a
//! value; submitting marks every failing field, empty ones included.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::core::config::ContactConfig;

const REQUIRED: &str = "This field is required";
const BAD_EMAIL: &str = "Please enter a valid email address";
const SHORT_NAME: &str = "Name must be at least 2 characters";
const SHORT_MESSAGE: &str = "Message must be at least 10 characters";

const MIN_NAME_CHARS: usize = 2;
const MIN_MESSAGE_CHARS: usize = 10;

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

/// Loose `local@domain.tld` shape check.
#[must_use]
pub fn is_valid_email(raw: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(raw))
}

/// The four form inputs, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Sender's name.
    Name,
    /// Sender's reply address.
    Email,
    /// Subject line, prefixed on submit.
    Subject,
    /// Free-form body.
    Message,
}

impl FieldKind {
    /// Every field in tab order.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Form label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }

    /// Next field, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Subject,
            Self::Subject => Self::Message,
            Self::Message => Self::Name,
        }
    }

    /// Previous field, wrapping.
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Name => Self::Message,
            Self::Email => Self::Name,
            Self::Subject => Self::Email,
            Self::Message => Self::Subject,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Subject => 2,
            Self::Message => 3,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation marker shown next to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldStatus {
    /// Untouched or emptied; no marker.
    #[default]
    Pristine,
    /// Passed every rule.
    Valid,
    /// Failed; carries the first failing rule's message.
    Invalid(String),
}

/// Check one field's raw value. Returns the first failing rule's message.
pub fn validate_field(kind: FieldKind, raw: &str) -> Result<(), &'static str> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(REQUIRED);
    }
    match kind {
        FieldKind::Email if !is_valid_email(value) => Err(BAD_EMAIL),
        FieldKind::Name if value.chars().count() < MIN_NAME_CHARS => Err(SHORT_NAME),
        FieldKind::Message if value.chars().count() < MIN_MESSAGE_CHARS => Err(SHORT_MESSAGE),
        _ => Ok(()),
    }
}

/// A composed `mailto:` link, ready to hand to the system mail client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailtoLink {
    /// Destination address.
    pub recipient: String,
    /// Full subject line, prefix included.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl MailtoLink {
    /// The percent-encoded URI.
    #[must_use]
    pub fn uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            percent_encode(&self.subject),
            percent_encode(&self.body)
        )
    }
}

impl fmt::Display for MailtoLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

/// Percent-encode every byte outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
#[must_use]
pub fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        let unreserved = byte.is_ascii_alphanumeric()
            || matches!(byte, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')');
        if unreserved {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Field values and their status markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    values: [String; 4],
    statuses: [FieldStatus; 4],
}

impl ContactForm {
    /// Empty form, every marker pristine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw (untrimmed) value of one field.
    #[must_use]
    pub fn value(&self, kind: FieldKind) -> &str {
        &self.values[kind.slot()]
    }

    /// Marker currently shown for one field.
    #[must_use]
    pub fn status(&self, kind: FieldKind) -> &FieldStatus {
        &self.statuses[kind.slot()]
    }

    /// Replace a field's value and refresh its marker.
    pub fn set(&mut self, kind: FieldKind, value: impl Into<String>) {
        self.values[kind.slot()] = value.into();
        self.refresh(kind);
    }

    /// Append one typed character.
    pub fn push_char(&mut self, kind: FieldKind, ch: char) {
        self.values[kind.slot()].push(ch);
        self.refresh(kind);
    }

    /// Delete the last character, if any.
    pub fn pop_char(&mut self, kind: FieldKind) {
        self.values[kind.slot()].pop();
        self.refresh(kind);
    }

    fn refresh(&mut self, kind: FieldKind) {
        let slot = kind.slot();
        self.statuses[slot] = if self.values[slot].trim().is_empty() {
            FieldStatus::Pristine
        } else {
            match validate_field(kind, &self.values[slot]) {
                Ok(()) => FieldStatus::Valid,
                Err(message) => FieldStatus::Invalid(message.to_string()),
            }
        };
    }

    /// Validate every field and, if all pass, compose the link from the
    /// values as typed and reset.
    ///
    /// On failure each failing field is marked and the form keeps its
    /// values; the returned list is in tab order.
    pub fn submit(&mut self, target: &ContactConfig) -> Result<MailtoLink, Vec<(FieldKind, String)>> {
        let mut failures = Vec::new();
        for kind in FieldKind::ALL {
            if let Err(message) = validate_field(kind, self.value(kind)) {
                self.statuses[kind.slot()] = FieldStatus::Invalid(message.to_string());
                failures.push((kind, message.to_string()));
            }
        }
        if !failures.is_empty() {
            return Err(failures);
        }

        // Validation trims; the composed message keeps what was typed.
        let name = self.value(FieldKind::Name);
        let email = self.value(FieldKind::Email);
        let message = self.value(FieldKind::Message);
        let link = MailtoLink {
            recipient: target.recipient.trim().to_string(),
            subject: format!("{}{}", target.subject_prefix, self.value(FieldKind::Subject)),
            body: format!("Name: {name}\nEmail: {email}\n\nMessage:\n{message}"),
        };
        self.reset();
        Ok(link)
    }

    /// Clear every value and marker.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether any field has content.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.values.iter().any(|v| !v.is_empty())
    }
}
