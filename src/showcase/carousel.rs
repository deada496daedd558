//! Testimonial carousel: a wrapping index over a fixed number of slides.
//!
//! All transitions are pure state changes. [`Carousel::render`] projects the
//! state into a [`CarouselView`] that the painter draws; nothing in here
//! touches a terminal.

#![allow(missing_docs)]

/// Result of a navigation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// The index changed (or was re-set to the same slide).
    Moved { from: usize, to: usize },
    /// The carousel has no slides; nothing happened.
    Empty,
}

/// Index state for the testimonial slider.
///
/// `slide_count` is fixed at construction. For a non-empty carousel,
/// `index < slide_count` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    slide_count: usize,
}

/// Render-ready projection of the carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselView {
    /// Active slide, `None` for an empty carousel.
    pub active: Option<usize>,
    /// One flag per slide; exactly one is set when non-empty.
    pub slides: Vec<bool>,
    /// One flag per indicator dot, mirroring `slides`.
    pub indicators: Vec<bool>,
    /// Horizontal track translation in percent of one slide width.
    pub track_offset_pct: usize,
}

impl Carousel {
    #[must_use]
    pub const fn new(slide_count: usize) -> Self {
        Self {
            index: 0,
            slide_count,
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.slide_count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slide_count == 0
    }

    /// Advance one slide, wrapping from the last slide to the first.
    pub fn next(&mut self) -> Navigation {
        if self.slide_count == 0 {
            return Navigation::Empty;
        }
        let from = self.index;
        self.index = (self.index + 1) % self.slide_count;
        Navigation::Moved {
            from,
            to: self.index,
        }
    }

    /// Step back one slide, wrapping from the first slide to the last.
    pub fn prev(&mut self) -> Navigation {
        if self.slide_count == 0 {
            return Navigation::Empty;
        }
        let from = self.index;
        self.index = (self.index + self.slide_count - 1) % self.slide_count;
        Navigation::Moved {
            from,
            to: self.index,
        }
    }

    /// Jump directly to slide `n`.
    ///
    /// Callers (the indicator row) only pass positions of existing dots, so
    /// `n >= slide_count` is a caller bug: it trips a debug assertion and is
    /// otherwise ignored.
    pub fn goto(&mut self, n: usize) -> Navigation {
        debug_assert!(
            n < self.slide_count,
            "goto({n}) out of range for {} slides",
            self.slide_count
        );
        if n >= self.slide_count {
            return Navigation::Empty;
        }
        let from = self.index;
        self.index = n;
        Navigation::Moved { from, to: n }
    }

    /// Project the current index into per-slide and per-indicator flags.
    #[must_use]
    pub fn render(&self) -> CarouselView {
        if self.slide_count == 0 {
            return CarouselView {
                active: None,
                slides: Vec::new(),
                indicators: Vec::new(),
                track_offset_pct: 0,
            };
        }
        let flags: Vec<bool> = (0..self.slide_count).map(|i| i == self.index).collect();
        CarouselView {
            active: Some(self.index),
            indicators: flags.clone(),
            slides: flags,
            track_offset_pct: self.index * 100,
        }
    }
}
