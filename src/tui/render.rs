//! Frame rendering for the showcase.
//!
//! Two steps:
//! - `render_frame()` paints the model into a [`Frame`] of styled cells. Pure,
//!   so tests assert on the text content directly.
//! - `paint()` flushes a frame to a crossterm writer using the active theme.

#![allow(missing_docs)]

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::showcase::contact::{FieldKind, FieldStatus};
use crate::showcase::modal::ModalAction;

use super::input::{InputContext, contextual_help};
use super::layout::{
    CLOSE_LABEL, HitTarget, MIN_USABLE_COLS, MIN_USABLE_ROWS, PaneRect, SUBMIT_LABEL,
    ShowcaseLayout, filter_label,
};
use super::model::{NotificationLevel, Section, ShowcaseModel};
use super::theme::{SemanticToken, Theme};

const TITLE: &str = " folio ";
const LABEL_COL: u16 = 2;

// ──────────────────── frame ────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub token: SemanticToken,
    pub bold: bool,
}

impl Cell {
    const BLANK: Self = Self {
        ch: ' ',
        token: SemanticToken::Neutral,
        bold: false,
    };
}

/// A grid of styled cells the size of the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Frame {
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::BLANK; usize::from(cols) * usize::from(rows)],
        }
    }

    #[must_use]
    pub const fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        (col < self.cols && row < self.rows)
            .then(|| usize::from(row) * usize::from(self.cols) + usize::from(col))
    }

    #[must_use]
    pub fn cell(&self, col: u16, row: u16) -> Option<Cell> {
        self.index(col, row).map(|i| self.cells[i])
    }

    /// Write `text` starting at `(col, row)`, clipped to the frame. Returns the
    /// column after the last written character.
    pub fn put_str(
        &mut self,
        col: u16,
        row: u16,
        text: &str,
        token: SemanticToken,
        bold: bool,
    ) -> u16 {
        let mut x = col;
        for ch in text.chars() {
            let Some(i) = self.index(x, row) else {
                break;
            };
            self.cells[i] = Cell { ch, token, bold };
            x += 1;
        }
        x
    }

    /// Like [`Frame::put_str`] but stops at `max_width` characters.
    pub fn put_clipped(
        &mut self,
        col: u16,
        row: u16,
        text: &str,
        max_width: u16,
        token: SemanticToken,
        bold: bool,
    ) -> u16 {
        let clipped = truncate(text, usize::from(max_width));
        self.put_str(col, row, &clipped, token, bold)
    }

    /// Restyle every cell, keeping its character.
    pub fn dim(&mut self) {
        for cell in &mut self.cells {
            cell.token = SemanticToken::Muted;
            cell.bold = false;
        }
    }

    /// Text of one row with trailing blanks trimmed.
    #[must_use]
    pub fn row_text(&self, row: u16) -> String {
        if row >= self.rows {
            return String::new();
        }
        let start = usize::from(row) * usize::from(self.cols);
        let text: String = self.cells[start..start + usize::from(self.cols)]
            .iter()
            .map(|c| c.ch)
            .collect();
        text.trim_end().to_string()
    }

    /// Whole frame as newline-joined rows.
    #[must_use]
    pub fn to_text(&self) -> String {
        (0..self.rows)
            .map(|row| self.row_text(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any row contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        (0..self.rows).any(|row| self.row_text(row).contains(needle))
    }
}

// ──────────────────── render ────────────────────

/// Paint the model into a fresh frame using a layout built from it.
#[must_use]
pub fn render_frame(model: &ShowcaseModel, layout: &ShowcaseLayout) -> Frame {
    let mut frame = Frame::new(layout.cols, layout.rows);
    if layout.too_small {
        render_too_small(&mut frame, layout);
        return frame;
    }

    render_header(&mut frame, model, layout);
    match model.section {
        Section::Portfolio => render_portfolio(&mut frame, model, layout),
        Section::Testimonials => render_testimonials(&mut frame, model, layout),
        Section::Contact => render_contact(&mut frame, model, layout),
    }
    render_notification(&mut frame, model, layout);
    render_footer(&mut frame, model, layout);

    if let Some(rect) = layout.modal {
        frame.dim();
        render_modal(&mut frame, model, layout, rect);
    }
    frame
}

fn render_too_small(frame: &mut Frame, layout: &ShowcaseLayout) {
    let lines = [
        "Terminal too small".to_string(),
        format!("need {MIN_USABLE_COLS}x{MIN_USABLE_ROWS}, have {}x{}", layout.cols, layout.rows),
    ];
    let top = layout.rows / 2;
    for (i, line) in lines.iter().enumerate() {
        let row = top.saturating_sub(1) + u16::try_from(i).unwrap_or(0);
        let col = centered_col(layout.cols, line);
        frame.put_str(col, row, line, SemanticToken::Danger, i == 0);
    }
}

fn render_header(frame: &mut Frame, model: &ShowcaseModel, layout: &ShowcaseLayout) {
    frame.put_str(1, 0, TITLE, SemanticToken::Accent, true);
    for section in Section::ALL {
        let Some(rect) = layout.painted_rect_of(HitTarget::Tab(section)) else {
            continue;
        };
        let active = section == model.section;
        let text = if active {
            format!("[{}]", section.label())
        } else {
            format!(" {} ", section.label())
        };
        let token = if active {
            SemanticToken::Accent
        } else {
            SemanticToken::Muted
        };
        frame.put_str(rect.col, rect.row, &text, token, active);
    }
    let rule = "─".repeat(usize::from(layout.cols));
    frame.put_str(0, 1, &rule, SemanticToken::Muted, false);
}

fn render_portfolio(frame: &mut Frame, model: &ShowcaseModel, layout: &ShowcaseLayout) {
    frame.put_str(LABEL_COL, 2, "Featured work", SemanticToken::Neutral, true);

    for (i, tag) in model.filter.controls().iter().enumerate() {
        let Some(rect) = layout.painted_rect_of(HitTarget::FilterButton(i)) else {
            continue;
        };
        let active = model.filter.is_control_active(i);
        let label = filter_label(tag);
        let (text, token) = if active {
            (format!("[▸{label} ]"), SemanticToken::Accent)
        } else {
            (format!("[ {label} ]"), SemanticToken::Muted)
        };
        frame.put_str(rect.col, rect.row, &text, token, active);
    }

    let Some(list) = layout.list else {
        return;
    };
    let visible = model.filter.visible_count();
    if visible == 0 {
        frame.put_str(
            list.rect.col,
            list.rect.row,
            "No projects in this category.",
            SemanticToken::Muted,
            false,
        );
        return;
    }

    if visible > list.capacity {
        let end = visible.min(model.scroll + list.capacity);
        let range = format!("{}-{} of {visible}", model.scroll + 1, end);
        let col = list
            .rect
            .col
            .saturating_add(list.rect.width)
            .saturating_sub(text_width(&range));
        frame.put_str(col, 2, &range, SemanticToken::Muted, false);
    }

    for (idx, item) in model.filter.visible_items().enumerate() {
        let Some(rect) = layout.painted_rect_of(HitTarget::Card(idx)) else {
            continue;
        };
        let selected = idx == model.selected;
        let icon = model
            .catalog
            .get(&item.project_id)
            .map_or("•", |record| record.icon.as_str());
        let marker = if selected { "›" } else { " " };
        let tag = format!("#{}", item.category);
        let title_width = rect.width.saturating_sub(text_width(&tag) + 1);
        let line = format!("{marker} {icon:<4} {}", item.title);
        let (token, bold) = if selected {
            (SemanticToken::Accent, true)
        } else {
            (SemanticToken::Neutral, false)
        };
        frame.put_clipped(rect.col, rect.row, &line, title_width, token, bold);
        let tag_col = rect.col + rect.width.saturating_sub(text_width(&tag));
        frame.put_str(tag_col, rect.row, &tag, SemanticToken::Muted, false);
    }
}

fn render_testimonials(frame: &mut Frame, model: &ShowcaseModel, layout: &ShowcaseLayout) {
    frame.put_str(LABEL_COL, 2, "What clients say", SemanticToken::Neutral, true);

    let (Some(quote), Some(active)) = (layout.quote, model.carousel.render().active) else {
        frame.put_str(LABEL_COL, 4, "No testimonials yet.", SemanticToken::Muted, false);
        return;
    };
    let Some(testimonial) = model.testimonials.get(active) else {
        return;
    };

    let mut lines: Vec<(String, SemanticToken, bool)> =
        wrap(&format!("“{}”", testimonial.quote), usize::from(quote.width))
            .into_iter()
            .map(|line| (line, SemanticToken::Neutral, false))
            .collect();
    lines.push((String::new(), SemanticToken::Neutral, false));
    lines.push((testimonial.author.clone(), SemanticToken::Accent, true));
    if !testimonial.role.is_empty() {
        lines.push((testimonial.role.clone(), SemanticToken::Muted, false));
    }

    let height = usize::from(quote.height);
    let skip = lines.len().saturating_sub(height);
    let shown = &lines[..lines.len() - skip];
    let pad = (height - shown.len()) / 2;
    for (i, (line, token, bold)) in shown.iter().enumerate() {
        let row = quote.row + u16::try_from(pad + i).unwrap_or(u16::MAX);
        let col = quote.col + quote.width.saturating_sub(text_width(line)) / 2;
        frame.put_str(col, row, line, *token, *bold);
    }

    if let Some(rect) = layout.painted_rect_of(HitTarget::PrevArrow) {
        frame.put_str(rect.col, rect.row, "‹", SemanticToken::Accent, true);
    }
    if let Some(rect) = layout.painted_rect_of(HitTarget::NextArrow) {
        frame.put_str(rect.col, rect.row, "›", SemanticToken::Accent, true);
    }

    let view = model.carousel.render();
    let mut indicator_row = None;
    for (i, is_active) in view.indicators.iter().enumerate() {
        let Some(rect) = layout.painted_rect_of(HitTarget::Indicator(i)) else {
            continue;
        };
        indicator_row = Some(rect.row);
        let (dot, token) = if *is_active {
            ("●", SemanticToken::Accent)
        } else {
            ("○", SemanticToken::Muted)
        };
        frame.put_str(rect.col, rect.row, dot, token, false);
    }

    if let Some(row) = indicator_row {
        let status = if model.autoplay {
            "autoplay on"
        } else {
            "autoplay paused"
        };
        let col = centered_col(layout.cols, status);
        frame.put_str(col, row + 1, status, SemanticToken::Muted, false);
    }
}

fn render_contact(frame: &mut Frame, model: &ShowcaseModel, layout: &ShowcaseLayout) {
    frame.put_str(LABEL_COL, 2, "Get in touch", SemanticToken::Neutral, true);

    for kind in FieldKind::ALL {
        let Some(rect) = layout.painted_rect_of(HitTarget::Field(kind)) else {
            continue;
        };
        let focused = kind == model.contact_focus;
        let label_token = if focused {
            SemanticToken::Accent
        } else {
            SemanticToken::Neutral
        };
        frame.put_str(
            LABEL_COL,
            rect.row,
            &format!("{}:", kind.label()),
            label_token,
            focused,
        );

        let cursor = if focused { "▏" } else { "" };
        let value = model.contact.value(kind);
        let room = usize::from(rect.width).saturating_sub(1);
        let shown = tail(value, room);
        let line = if value.is_empty() && !focused {
            field_placeholder(kind).to_string()
        } else {
            format!("{shown}{cursor}")
        };
        let token = if value.is_empty() {
            SemanticToken::Muted
        } else {
            SemanticToken::Neutral
        };
        frame.put_clipped(rect.col, rect.row, &line, rect.width, token, false);

        let status_row = rect.row + 1;
        match model.contact.status(kind) {
            FieldStatus::Invalid(message) => {
                frame.put_clipped(
                    rect.col,
                    status_row,
                    &format!("✗ {message}"),
                    rect.width,
                    SemanticToken::Danger,
                    false,
                );
            }
            FieldStatus::Valid => {
                frame.put_str(rect.col, status_row, "✓", SemanticToken::Success, false);
            }
            FieldStatus::Pristine => {}
        }
    }

    if let Some(rect) = layout.painted_rect_of(HitTarget::Submit) {
        frame.put_str(rect.col, rect.row, SUBMIT_LABEL, SemanticToken::Accent, true);
        if let Some(link) = &model.last_mailto {
            let row = rect.row + 1;
            if row < layout.body_bottom() {
                let width = layout.cols.saturating_sub(LABEL_COL + 1);
                frame.put_clipped(
                    LABEL_COL,
                    row,
                    &format!("Last draft: {}", link.uri()),
                    width,
                    SemanticToken::Muted,
                    false,
                );
            }
        }
    }
}

fn field_placeholder(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Name => "Your name",
        FieldKind::Email => "you@example.com",
        FieldKind::Subject => "What is this about?",
        FieldKind::Message => "Tell me about your project",
    }
}

fn render_notification(frame: &mut Frame, model: &ShowcaseModel, layout: &ShowcaseLayout) {
    let Some(latest) = model.notifications.last() else {
        return;
    };
    let (prefix, token) = match latest.level {
        NotificationLevel::Info => ("", SemanticToken::Accent),
        NotificationLevel::Warning => ("! ", SemanticToken::Danger),
        NotificationLevel::Error => ("✗ ", SemanticToken::Danger),
    };
    frame.put_clipped(
        1,
        layout.notification_row,
        &format!("{prefix}{}", latest.message),
        layout.cols.saturating_sub(2),
        token,
        latest.level != NotificationLevel::Info,
    );
}

fn render_footer(frame: &mut Frame, model: &ShowcaseModel, layout: &ShowcaseLayout) {
    let context = InputContext {
        section: model.section,
        modal_open: model.modal.is_open(),
        slide_count: model.carousel.slide_count(),
    };
    let row = layout.footer_row;
    let theme = format!("{} ", model.theme.label());
    let limit = layout.cols.saturating_sub(text_width(&theme) + 1);
    let mut col = 1;
    for binding in contextual_help(context) {
        let width = text_width(binding.keys) + text_width(binding.description) + 3;
        if col + width > limit {
            break;
        }
        col = frame.put_str(col, row, binding.keys, SemanticToken::Accent, true);
        col = frame.put_str(col + 1, row, binding.description, SemanticToken::Muted, false);
        col += 2;
    }
    frame.put_str(
        layout.cols.saturating_sub(text_width(&theme)),
        row,
        &theme,
        SemanticToken::Muted,
        false,
    );
}

fn render_modal(frame: &mut Frame, model: &ShowcaseModel, layout: &ShowcaseLayout, rect: PaneRect) {
    let Some(view) = model.modal.view() else {
        return;
    };
    draw_box(frame, rect);

    let inner_col = rect.col + 2;
    let inner_width = rect.width.saturating_sub(4);
    let title = format!(" {} {} ", view.icon, view.title);
    let close_col = layout
        .rect_of(HitTarget::ModalClose)
        .map_or(rect.col + rect.width, |r| r.col);
    frame.put_clipped(
        inner_col,
        rect.row,
        &title,
        close_col.saturating_sub(inner_col + 1),
        SemanticToken::Accent,
        true,
    );
    if let Some(close) = layout.rect_of(HitTarget::ModalClose) {
        frame.put_str(close.col, close.row, CLOSE_LABEL, SemanticToken::Danger, true);
    }

    let width = usize::from(inner_width);
    let mut lines: Vec<(String, SemanticToken, bool)> = wrap(view.description, width)
        .into_iter()
        .map(|line| (line, SemanticToken::Neutral, false))
        .collect();

    let mut section = |heading: &str, body: Vec<String>| {
        if body.is_empty() {
            return;
        }
        lines.push((String::new(), SemanticToken::Neutral, false));
        lines.push((heading.to_string(), SemanticToken::Accent, true));
        lines.extend(body.into_iter().map(|l| (l, SemanticToken::Neutral, false)));
    };
    section(
        "Technologies",
        if view.technologies.is_empty() {
            Vec::new()
        } else {
            wrap(&view.technologies.join(" · "), width)
        },
    );
    section("Key features", bullets(view.features, width));
    section("Achievements", bullets(view.achievements, width));

    let button_row = ModalAction::ALL
        .iter()
        .find_map(|action| layout.rect_of(HitTarget::ModalButton(*action)))
        .map_or(rect.row + rect.height.saturating_sub(2), |r| r.row);
    let first_row = rect.row + 2;
    let room = usize::from(button_row.saturating_sub(first_row + 1));
    let overflow = lines.len() > room;
    for (i, (line, token, bold)) in lines.iter().take(room).enumerate() {
        let row = first_row + u16::try_from(i).unwrap_or(u16::MAX);
        frame.put_clipped(inner_col, row, line, inner_width, *token, *bold);
    }
    if overflow && room > 0 {
        let row = first_row + u16::try_from(room - 1).unwrap_or(u16::MAX);
        let more = "…";
        frame.put_str(
            inner_col + inner_width.saturating_sub(1),
            row,
            more,
            SemanticToken::Muted,
            false,
        );
    }

    for action in view.actions {
        if let Some(button) = layout.rect_of(HitTarget::ModalButton(action)) {
            frame.put_str(
                button.col,
                button.row,
                &format!("[ {} ]", action.label()),
                SemanticToken::Accent,
                true,
            );
        }
    }
}

fn draw_box(frame: &mut Frame, rect: PaneRect) {
    if rect.width < 2 || rect.height < 2 {
        return;
    }
    let inner = usize::from(rect.width - 2);
    let bottom = rect.row + rect.height - 1;
    frame.put_str(
        rect.col,
        rect.row,
        &format!("┌{}┐", "─".repeat(inner)),
        SemanticToken::Accent,
        false,
    );
    let blank = " ".repeat(inner);
    for row in rect.row + 1..bottom {
        frame.put_str(rect.col, row, "│", SemanticToken::Accent, false);
        frame.put_str(rect.col + 1, row, &blank, SemanticToken::Neutral, false);
        frame.put_str(rect.col + rect.width - 1, row, "│", SemanticToken::Accent, false);
    }
    frame.put_str(
        rect.col,
        bottom,
        &format!("└{}┘", "─".repeat(inner)),
        SemanticToken::Accent,
        false,
    );
}

// ──────────────────── paint ────────────────────

/// Flush `frame` to `out`, batching runs of equal style.
///
/// # Errors
/// Propagates write errors from the terminal.
pub fn paint(frame: &Frame, theme: Theme, out: &mut impl Write) -> io::Result<()> {
    let background = theme.color(SemanticToken::Surface);
    let (cols, rows) = frame.size();
    for row in 0..rows {
        queue!(out, MoveTo(0, row))?;
        if let Some(bg) = background {
            queue!(out, SetBackgroundColor(bg))?;
        }
        let mut col = 0;
        while col < cols {
            let Some(first) = frame.cell(col, row) else {
                break;
            };
            let mut run = String::new();
            while let Some(cell) = frame.cell(col, row)
                && cell.token == first.token
                && cell.bold == first.bold
            {
                run.push(cell.ch);
                col += 1;
            }
            if let Some(fg) = theme.color(first.token) {
                queue!(out, SetForegroundColor(fg))?;
            }
            let weight = if first.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            queue!(out, SetAttribute(weight), Print(run))?;
        }
    }
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    out.flush()
}

// ──────────────────── text helpers ────────────────────

fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

fn centered_col(cols: u16, text: &str) -> u16 {
    cols.saturating_sub(text_width(text)) / 2
}

/// First `max` characters, with an ellipsis when cut.
fn truncate(text: &str, max: usize) -> String {
    let count = text.chars().count();
    if count <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Last `max` characters, so the cursor end of a long value stays visible.
fn tail(text: &str, max: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(max)).collect()
}

/// Greedy word wrap on character counts. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

fn bullets(items: &[String], width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for item in items {
        for (i, line) in wrap(item, width.saturating_sub(2)).into_iter().enumerate() {
            let lead = if i == 0 { "• " } else { "  " };
            out.push(format!("{lead}{line}"));
        }
    }
    out
}
