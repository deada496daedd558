//! Property-based tests for showcase reducer invariants.
//!
//! Uses `proptest` to drive arbitrary sequences of keys, clicks, ticks and
//! resizes through `update` and check the state invariants after every step:
//! exactly one active filter control, visibility matching the active tag, an
//! in-bounds carousel index, and a scroll lock that tracks the modal.

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use proptest::prelude::*;

use super::layout::{build_layout, hit_test};
use super::model::{Section, ShowcaseModel, ShowcaseMsg};
use super::render::render_frame;
use super::theme::ThemeMode;
use super::update::update;
use crate::core::config::ContactConfig;
use crate::showcase::content::ShowcaseContent;
use crate::showcase::filter::FilterTag;
use crate::showcase::modal::ScrollLock;

// ──────────────────── strategies ────────────────────

fn arb_key_code() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Char('1')),
        Just(KeyCode::Char('2')),
        Just(KeyCode::Char('3')),
        Just(KeyCode::Char('9')),
        Just(KeyCode::Char('h')),
        Just(KeyCode::Char('j')),
        Just(KeyCode::Char('k')),
        Just(KeyCode::Char('l')),
        Just(KeyCode::Char('p')),
        Just(KeyCode::Char('t')),
        Just(KeyCode::Char('x')),
        Just(KeyCode::Char('[')),
        Just(KeyCode::Char(']')),
        Just(KeyCode::Char('@')),
        Just(KeyCode::Esc),
        Just(KeyCode::Enter),
        Just(KeyCode::Tab),
        Just(KeyCode::BackTab),
        Just(KeyCode::Backspace),
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
        Just(KeyCode::PageUp),
        Just(KeyCode::PageDown),
    ]
}

fn arb_mouse_kind() -> impl Strategy<Value = MouseEventKind> {
    prop_oneof![
        4 => Just(MouseEventKind::Down(MouseButton::Left)),
        1 => Just(MouseEventKind::ScrollUp),
        1 => Just(MouseEventKind::ScrollDown),
    ]
}

fn arb_msg() -> impl Strategy<Value = ShowcaseMsg> {
    prop_oneof![
        6 => arb_key_code()
            .prop_map(|code| ShowcaseMsg::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        3 => (arb_mouse_kind(), 0u16..120, 0u16..40).prop_map(|(kind, column, row)| {
            ShowcaseMsg::Mouse(MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })
        }),
        1 => Just(ShowcaseMsg::AutoplayTick),
        1 => (20u16..140, 8u16..50).prop_map(|(cols, rows)| ShowcaseMsg::Resize { cols, rows }),
        1 => (0u64..10).prop_map(ShowcaseMsg::NotificationExpired),
    ]
}

fn fresh_model() -> ShowcaseModel {
    ShowcaseModel::new(
        ShowcaseContent::builtin(),
        ContactConfig::default(),
        ThemeMode::Dark,
        true,
        (100, 30),
    )
}

fn assert_model_invariants(model: &ShowcaseModel) {
    let controls = model.filter.controls();
    let active: Vec<usize> = (0..controls.len())
        .filter(|i| model.filter.is_control_active(*i))
        .collect();
    assert_eq!(active.len(), 1, "exactly one filter control must be active");

    let tag = model.filter.active_filter();
    for (i, item) in model.filter.items().iter().enumerate() {
        assert_eq!(
            model.filter.is_visible(i),
            tag.matches(&item.category),
            "visibility of {} disagrees with filter {tag}",
            item.project_id
        );
    }

    let visible = model.filter.visible_count();
    if visible == 0 {
        assert_eq!(model.selected, 0);
    } else {
        assert!(model.selected < visible, "cursor past visible cards");
    }

    let slides = model.carousel.slide_count();
    if slides > 0 {
        assert!(model.carousel.index() < slides);
        let view = model.carousel.render();
        assert_eq!(view.indicators.iter().filter(|on| **on).count(), 1);
    }

    let expected_lock = if model.modal.is_open() {
        ScrollLock::Locked
    } else {
        ScrollLock::Free
    };
    assert_eq!(model.modal.background_scroll(), expected_lock);
    if let Some(id) = model.modal.open_project_id() {
        assert!(model.catalog.contains(id), "modal shows unknown project {id}");
    }

    assert!(model.notifications.len() <= 3);
}

// ──────────────────── properties ────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn reducer_preserves_invariants(msgs in prop::collection::vec(arb_msg(), 1..80)) {
        let mut model = fresh_model();
        for msg in msgs {
            let _ = update(&mut model, msg);
            assert_model_invariants(&model);
        }
    }

    #[test]
    fn random_sequences_always_render(msgs in prop::collection::vec(arb_msg(), 1..40)) {
        let mut model = fresh_model();
        for msg in msgs {
            let _ = update(&mut model, msg);
            let layout = build_layout(&model);
            let frame = render_frame(&model, &layout);
            prop_assert_eq!(frame.size(), model.terminal_size);
        }
    }

    #[test]
    fn quit_is_monotonic(msgs in prop::collection::vec(arb_msg(), 1..40)) {
        let mut model = fresh_model();
        let _ = update(
            &mut model,
            ShowcaseMsg::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
        );
        prop_assert!(model.quit);
        for msg in msgs {
            let _ = update(&mut model, msg);
            prop_assert!(model.quit, "quit flag reverted after being set");
        }
    }

    #[test]
    fn every_filter_tag_shows_only_its_category(idx in 0usize..8) {
        let mut model = fresh_model();
        model.filter.select_control(idx);
        let tag = model.filter.active_filter().clone();
        for item in model.filter.visible_items() {
            prop_assert!(tag.matches(&item.category));
        }
        if tag == FilterTag::All {
            prop_assert_eq!(model.filter.visible_count(), model.filter.items().len());
        }
    }

    #[test]
    fn slide_navigation_wraps(steps in 0usize..50) {
        let mut model = fresh_model();
        model.section = Section::Testimonials;
        let slides = model.carousel.slide_count();
        for _ in 0..steps {
            let _ = update(
                &mut model,
                ShowcaseMsg::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)),
            );
        }
        prop_assert_eq!(model.carousel.index(), steps % slides);
        for _ in 0..steps {
            let _ = update(
                &mut model,
                ShowcaseMsg::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)),
            );
        }
        prop_assert_eq!(model.carousel.index(), 0);
    }

    #[test]
    fn clicks_while_modal_open_never_reach_the_page(
        col in 0u16..100,
        row in 0u16..30,
    ) {
        let mut model = fresh_model();
        let catalog = model.catalog.clone();
        model.modal.open(&catalog, "project2");
        let before_section = model.section;
        let before_filter = model.filter.active_control();
        let layout = build_layout(&model);
        let target = hit_test(&layout, col, row);
        prop_assert!(target.is_some(), "backdrop covers the whole screen");

        let _ = update(
            &mut model,
            ShowcaseMsg::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: col,
                row,
                modifiers: KeyModifiers::NONE,
            }),
        );
        prop_assert_eq!(model.section, before_section);
        prop_assert_eq!(model.filter.active_control(), before_filter);
    }

    #[test]
    fn resize_preserves_dimensions(cols in 1u16..300, rows in 1u16..120) {
        let mut model = fresh_model();
        let _ = update(&mut model, ShowcaseMsg::Resize { cols, rows });
        prop_assert_eq!(model.terminal_size, (cols, rows));
        assert_model_invariants(&model);
    }
}
