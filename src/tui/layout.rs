//! Screen geometry and mouse hit-testing.
//!
//! [`build_layout`] turns the model into a plan of rectangles. The painter
//! draws into those rectangles and `update` hit-tests clicks against the same
//! plan, so what is drawn and what is clickable never drift apart.

#![allow(missing_docs)]

use crate::showcase::contact::FieldKind;
use crate::showcase::filter::FilterTag;
use crate::showcase::modal::ModalAction;

use super::model::{Section, ShowcaseModel};

/// Minimum terminal width below which only a "too small" message is shown.
pub const MIN_USABLE_COLS: u16 = 40;
/// Minimum terminal height below which only a "too small" message is shown.
pub const MIN_USABLE_ROWS: u16 = 14;

const TITLE: &str = " folio ";
const TABS_COL: u16 = 10;
const BODY_TOP: u16 = 2;
const FIELD_COL: u16 = 12;
const MODAL_MAX_WIDTH: u16 = 76;
const MODAL_MAX_HEIGHT: u16 = 22;

/// Label painted on the contact submit button.
pub const SUBMIT_LABEL: &str = "[ Send Message ]";
/// Label painted on the modal close button.
pub const CLOSE_LABEL: &str = "[x]";

#[must_use]
pub const fn is_terminal_too_small(cols: u16, rows: u16) -> bool {
    cols < MIN_USABLE_COLS || rows < MIN_USABLE_ROWS
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl PaneRect {
    #[must_use]
    pub const fn new(col: u16, row: u16, width: u16, height: u16) -> Self {
        Self {
            col,
            row,
            width,
            height,
        }
    }

    #[must_use]
    pub const fn contains(self, x: u16, y: u16) -> bool {
        x >= self.col
            && x < self.col.saturating_add(self.width)
            && y >= self.row
            && y < self.row.saturating_add(self.height)
    }
}

/// Something a left click can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Tab(Section),
    /// Filter control by index into `FilterState::controls`.
    FilterButton(usize),
    /// Portfolio card by index into the visible items.
    Card(usize),
    PrevArrow,
    NextArrow,
    /// Carousel indicator dot.
    Indicator(usize),
    Field(FieldKind),
    Submit,
    ModalClose,
    ModalButton(ModalAction),
    /// Inside the modal box but on nothing interactive.
    ModalBody,
    /// Anywhere outside the modal box while it is open.
    ModalBackdrop,
}

/// Portfolio card window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLayout {
    pub rect: PaneRect,
    /// Card rows that fit.
    pub capacity: usize,
}

/// Full-screen plan for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseLayout {
    pub cols: u16,
    pub rows: u16,
    pub too_small: bool,
    /// Interactive rectangles, in hit-test priority order.
    pub targets: Vec<(HitTarget, PaneRect)>,
    /// Page targets hidden behind the open modal. Painted, never hit.
    pub underlay: Vec<(HitTarget, PaneRect)>,
    pub list: Option<ListLayout>,
    /// Testimonial quote area.
    pub quote: Option<PaneRect>,
    pub modal: Option<PaneRect>,
    pub notification_row: u16,
    pub footer_row: u16,
}

impl ShowcaseLayout {
    /// Rectangle of the first target equal to `target`.
    #[must_use]
    pub fn rect_of(&self, target: HitTarget) -> Option<PaneRect> {
        self.targets
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, rect)| *rect)
    }

    /// Where `target` is drawn, looking behind the modal too.
    #[must_use]
    pub fn painted_rect_of(&self, target: HitTarget) -> Option<PaneRect> {
        self.rect_of(target).or_else(|| {
            self.underlay
                .iter()
                .find(|(t, _)| *t == target)
                .map(|(_, rect)| *rect)
        })
    }

    /// Bottom of the section body (exclusive).
    #[must_use]
    pub const fn body_bottom(&self) -> u16 {
        self.notification_row
    }
}

/// Caption used on a filter button.
#[must_use]
pub fn filter_label(tag: &FilterTag) -> String {
    match tag {
        FilterTag::All => "All".to_string(),
        FilterTag::Category(name) => name.clone(),
    }
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// Plan every rectangle for the model's current state and terminal size.
#[must_use]
pub fn build_layout(model: &ShowcaseModel) -> ShowcaseLayout {
    let (cols, rows) = model.terminal_size;
    let mut layout = ShowcaseLayout {
        cols,
        rows,
        too_small: is_terminal_too_small(cols, rows),
        targets: Vec::new(),
        underlay: Vec::new(),
        list: None,
        quote: None,
        modal: None,
        notification_row: rows.saturating_sub(2),
        footer_row: rows.saturating_sub(1),
    };
    if layout.too_small {
        return layout;
    }

    place_tabs(&mut layout);
    match model.section {
        Section::Portfolio => place_portfolio(&mut layout, model),
        Section::Testimonials => place_testimonials(&mut layout, model.carousel.slide_count()),
        Section::Contact => place_contact(&mut layout),
    }
    if model.modal.is_open() {
        layout.underlay = std::mem::take(&mut layout.targets);
        place_modal(&mut layout);
    }
    layout
}

/// What, if anything, a click at `(x, y)` lands on.
#[must_use]
pub fn hit_test(layout: &ShowcaseLayout, x: u16, y: u16) -> Option<HitTarget> {
    layout
        .targets
        .iter()
        .find(|(_, rect)| rect.contains(x, y))
        .map(|(target, _)| *target)
}

fn place_tabs(layout: &mut ShowcaseLayout) {
    let mut col = TABS_COL.max(text_width(TITLE) + 2);
    for section in Section::ALL {
        let width = text_width(section.label()) + 2;
        if col + width > layout.cols {
            break;
        }
        layout
            .targets
            .push((HitTarget::Tab(section), PaneRect::new(col, 0, width, 1)));
        col += width + 1;
    }
}

fn place_portfolio(layout: &mut ShowcaseLayout, model: &ShowcaseModel) {
    let filter_row = BODY_TOP + 1;
    let mut col = 2;
    for (i, tag) in model.filter.controls().iter().enumerate() {
        let width = text_width(&filter_label(tag)) + 4;
        if col + width >= layout.cols {
            break;
        }
        layout.targets.push((
            HitTarget::FilterButton(i),
            PaneRect::new(col, filter_row, width, 1),
        ));
        col += width + 1;
    }

    let list_top = filter_row + 2;
    let height = layout.body_bottom().saturating_sub(list_top);
    let rect = PaneRect::new(2, list_top, layout.cols.saturating_sub(4), height);
    let capacity = usize::from(height);
    layout.list = Some(ListLayout { rect, capacity });

    let visible = model.filter.visible_count();
    let end = visible.min(model.scroll + capacity);
    for (row, idx) in (model.scroll..end).enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        layout.targets.push((
            HitTarget::Card(idx),
            PaneRect::new(rect.col, list_top + row, rect.width, 1),
        ));
    }
}

fn place_testimonials(layout: &mut ShowcaseLayout, slide_count: usize) {
    if slide_count == 0 {
        return;
    }
    let indicator_row = layout.body_bottom().saturating_sub(2);
    let quote_top = BODY_TOP + 1;
    let quote_height = indicator_row.saturating_sub(quote_top + 1);
    layout.quote = Some(PaneRect::new(
        4,
        quote_top,
        layout.cols.saturating_sub(8),
        quote_height,
    ));

    let mid = quote_top + quote_height / 2;
    layout
        .targets
        .push((HitTarget::PrevArrow, PaneRect::new(1, mid, 1, 1)));
    layout.targets.push((
        HitTarget::NextArrow,
        PaneRect::new(layout.cols.saturating_sub(2), mid, 1, 1),
    ));

    let count = u16::try_from(slide_count).unwrap_or(u16::MAX);
    let width = count.saturating_mul(2).saturating_sub(1);
    let start = layout.cols.saturating_sub(width) / 2;
    for i in 0..count {
        let col = start + i * 2;
        if col >= layout.cols {
            break;
        }
        layout.targets.push((
            HitTarget::Indicator(usize::from(i)),
            PaneRect::new(col, indicator_row, 1, 1),
        ));
    }
}

fn place_contact(layout: &mut ShowcaseLayout) {
    let width = layout.cols.saturating_sub(FIELD_COL + 2);
    let mut row = BODY_TOP + 1;
    for kind in FieldKind::ALL {
        layout.targets.push((
            HitTarget::Field(kind),
            PaneRect::new(FIELD_COL, row, width, 1),
        ));
        row += 2;
    }
    layout.targets.push((
        HitTarget::Submit,
        PaneRect::new(FIELD_COL, row, text_width(SUBMIT_LABEL), 1),
    ));
}

fn place_modal(layout: &mut ShowcaseLayout) {
    let width = layout.cols.saturating_sub(4).min(MODAL_MAX_WIDTH);
    let height = layout.rows.saturating_sub(2).min(MODAL_MAX_HEIGHT);
    let left = (layout.cols - width) / 2;
    let top = (layout.rows - height) / 2;
    let modal = PaneRect::new(left, top, width, height);
    layout.modal = Some(modal);

    let close_width = text_width(CLOSE_LABEL);
    layout.targets.push((
        HitTarget::ModalClose,
        PaneRect::new(left + width - close_width - 2, top, close_width, 1),
    ));

    let button_row = top + height - 2;
    let mut col = left + 2;
    for action in ModalAction::ALL {
        let w = text_width(action.label()) + 4;
        if col + w >= left + width {
            break;
        }
        layout.targets.push((
            HitTarget::ModalButton(action),
            PaneRect::new(col, button_row, w, 1),
        ));
        col += w + 2;
    }

    layout.targets.push((HitTarget::ModalBody, modal));
    layout.targets.push((
        HitTarget::ModalBackdrop,
        PaneRect::new(0, 0, layout.cols, layout.rows),
    ));
}
