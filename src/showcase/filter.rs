//! Portfolio filter: one active category tag over an ordered item list.
//!
//! Visibility is recomputed for every item on every filter change. The item
//! count is small, so there is no incremental bookkeeping to get wrong.

use std::fmt;

/// Wildcard tag that matches every item.
pub const ALL_TAG: &str = "all";

/// A filter control's tag: the wildcard or one category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterTag {
    /// Matches every item.
    All,
    /// Matches items of exactly this category.
    Category(String),
}

impl FilterTag {
    /// Parse a control attribute. Exactly `"all"` is the wildcard, anything
    /// else a category (including unknown ones, which simply match nothing).
    /// Like category matching, this is case-sensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == ALL_TAG {
            Self::All
        } else {
            Self::Category(raw.to_string())
        }
    }

    /// Whether an item tagged `category` is visible under this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(tag) => tag == category,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_TAG,
            Self::Category(tag) => tag,
        }
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One card in the portfolio grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioItem {
    /// Key into the project catalog.
    pub project_id: String,
    /// Card caption.
    pub title: String,
    /// Single category tag the filter matches against.
    pub category: String,
}

/// Active filter, the filter controls, and the derived visibility mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    controls: Vec<FilterTag>,
    active_control: usize,
    items: Vec<PortfolioItem>,
    visible: Vec<bool>,
}

impl FilterState {
    /// Build the filter with controls `All` followed by each distinct item
    /// category in first-appearance order. Starts on `All`.
    #[must_use]
    pub fn new(items: Vec<PortfolioItem>) -> Self {
        let mut controls = vec![FilterTag::All];
        for item in &items {
            let tag = FilterTag::Category(item.category.clone());
            if !controls.contains(&tag) {
                controls.push(tag);
            }
        }
        let visible = vec![true; items.len()];
        Self {
            controls,
            active_control: 0,
            items,
            visible,
        }
    }

    /// Select `tag` as the active filter and recompute every item's visibility.
    ///
    /// A tag no control carries gets its own control appended so that exactly
    /// one control is always active; it matches no items.
    pub fn set_filter(&mut self, tag: FilterTag) {
        let position = match self.controls.iter().position(|c| *c == tag) {
            Some(position) => position,
            None => {
                self.controls.push(tag);
                self.controls.len() - 1
            }
        };
        self.active_control = position;

        let active = &self.controls[self.active_control];
        for (slot, item) in self.visible.iter_mut().zip(&self.items) {
            *slot = active.matches(&item.category);
        }
    }

    /// Select the control at `index`. Out-of-range indices are ignored.
    pub fn select_control(&mut self, index: usize) {
        if let Some(tag) = self.controls.get(index).cloned() {
            self.set_filter(tag);
        }
    }

    /// Move the active control one step right, wrapping.
    pub fn next_control(&mut self) {
        let next = (self.active_control + 1) % self.controls.len();
        self.select_control(next);
    }

    /// Move the active control one step left, wrapping.
    pub fn prev_control(&mut self) {
        let len = self.controls.len();
        let prev = (self.active_control + len - 1) % len;
        self.select_control(prev);
    }

    #[must_use]
    pub fn active_filter(&self) -> &FilterTag {
        &self.controls[self.active_control]
    }

    #[must_use]
    pub const fn active_control(&self) -> usize {
        self.active_control
    }

    #[must_use]
    pub fn controls(&self) -> &[FilterTag] {
        &self.controls
    }

    /// Whether control `index` carries the active marker.
    #[must_use]
    pub const fn is_control_active(&self, index: usize) -> bool {
        index == self.active_control
    }

    #[must_use]
    pub fn items(&self) -> &[PortfolioItem] {
        &self.items
    }

    #[must_use]
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn visible_items(&self) -> impl Iterator<Item = &PortfolioItem> {
        self.items
            .iter()
            .zip(&self.visible)
            .filter_map(|(item, visible)| visible.then_some(item))
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn six_items() -> Vec<PortfolioItem> {
        ["web", "video", "ai", "bot", "design", "3d"]
            .iter()
            .enumerate()
            .map(|(i, category)| PortfolioItem {
                project_id: format!("project{}", i + 1),
                title: format!("Project {}", i + 1),
                category: (*category).to_string(),
            })
            .collect()
    }

    fn visible_ids(state: &FilterState) -> Vec<&str> {
        state
            .visible_items()
            .map(|item| item.project_id.as_str())
            .collect()
    }

    #[test]
    fn starts_with_everything_visible() {
        let state = FilterState::new(six_items());
        assert_eq!(state.active_filter(), &FilterTag::All);
        assert_eq!(state.visible_count(), 6);
        assert_eq!(state.controls().len(), 7);
    }

    #[test]
    fn ai_filter_shows_only_project3() {
        let mut state = FilterState::new(six_items());
        state.set_filter(FilterTag::parse("ai"));
        assert_eq!(visible_ids(&state), ["project3"]);

        state.set_filter(FilterTag::parse("all"));
        assert_eq!(state.visible_count(), 6);
    }

    #[test]
    fn exactly_one_control_is_active() {
        let mut state = FilterState::new(six_items());
        state.set_filter(FilterTag::parse("bot"));
        let active: Vec<usize> = (0..state.controls().len())
            .filter(|i| state.is_control_active(*i))
            .collect();
        assert_eq!(active.len(), 1);
        assert_eq!(state.controls()[active[0]], FilterTag::parse("bot"));
    }

    #[test]
    fn unknown_tag_matches_nothing_and_gets_a_control() {
        let mut state = FilterState::new(six_items());
        state.set_filter(FilterTag::parse("podcast"));
        assert_eq!(state.visible_count(), 0);
        assert_eq!(state.active_filter().as_str(), "podcast");
        assert_eq!(state.controls().len(), 8);

        // Re-selecting reuses the same control.
        state.set_filter(FilterTag::parse("podcast"));
        assert_eq!(state.controls().len(), 8);
    }

    #[test]
    fn control_cycling_wraps() {
        let mut state = FilterState::new(six_items());
        state.prev_control();
        assert_eq!(state.active_filter().as_str(), "3d");
        state.next_control();
        assert_eq!(state.active_filter(), &FilterTag::All);
    }

    #[test]
    fn duplicate_categories_share_a_control() {
        let mut items = six_items();
        items[1].category = "web".to_string();
        let mut state = FilterState::new(items);
        assert_eq!(state.controls().len(), 6);
        state.set_filter(FilterTag::parse("web"));
        assert_eq!(visible_ids(&state), ["project1", "project2"]);
    }

    #[test]
    fn empty_item_list_is_fine() {
        let mut state = FilterState::new(Vec::new());
        state.set_filter(FilterTag::parse("web"));
        assert_eq!(state.visible_count(), 0);
        state.set_filter(FilterTag::All);
        assert_eq!(state.controls().len(), 2);
    }

    #[test]
    fn wildcard_and_categories_both_match_exactly() {
        assert_eq!(FilterTag::parse("all"), FilterTag::All);
        assert_eq!(FilterTag::parse("ALL"), FilterTag::Category("ALL".into()));
        assert_eq!(FilterTag::parse(" all"), FilterTag::Category(" all".into()));

        let mut state = FilterState::new(six_items());
        state.set_filter(FilterTag::parse("ALL"));
        assert_eq!(state.visible_count(), 0);
        state.set_filter(FilterTag::parse("AI"));
        assert_eq!(state.visible_count(), 0);
    }

    fn arb_items() -> impl Strategy<Value = Vec<PortfolioItem>> {
        prop::collection::vec(prop::sample::select(vec!["web", "ai", "bot", "3d"]), 0..12)
            .prop_map(|categories| {
                categories
                    .into_iter()
                    .enumerate()
                    .map(|(i, category)| PortfolioItem {
                        project_id: format!("p{i}"),
                        title: format!("P{i}"),
                        category: category.to_string(),
                    })
                    .collect()
            })
    }

    fn arb_tag() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("all".to_string()),
            prop::sample::select(vec!["web", "ai", "bot", "3d"]).prop_map(str::to_string),
            "[A-Za-z0-9 ]{0,8}",
        ]
    }

    proptest! {
        #[test]
        fn visibility_follows_any_tag(
            items in arb_items(),
            tags in prop::collection::vec(arb_tag(), 1..20),
        ) {
            let mut state = FilterState::new(items);
            for raw in &tags {
                let tag = FilterTag::parse(raw);
                state.set_filter(tag.clone());

                for (i, item) in state.items().iter().enumerate() {
                    let expected = tag == FilterTag::All || item.category == *raw;
                    prop_assert_eq!(state.is_visible(i), expected);
                }
                let active = (0..state.controls().len())
                    .filter(|i| state.is_control_active(*i))
                    .count();
                prop_assert_eq!(active, 1);
                prop_assert_eq!(state.active_filter(), &tag);
            }
        }
    }
}
