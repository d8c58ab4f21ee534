// Copyright 2026 Contribdeck Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::catalog::card::{CardKind, CatalogCard};
use serde::{Deserialize, Serialize};

/// Sentinel facet value meaning "no constraint".
pub const FACET_ALL: &str = "all";

/// The active search/filter controls. Each control is a single text field or
/// a mutually exclusive selector, so state is always fully replaced per
/// change — there is no partial merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub language: String,
    pub difficulty: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            language: FACET_ALL.to_string(),
            difficulty: FACET_ALL.to_string(),
        }
    }
}

impl FilterState {
    /// Composite predicate: case-insensitive substring on the card's name
    /// (title and owning-repo name for issues), AND language equality, AND
    /// difficulty equality, with "all" satisfying a facet trivially.
    pub fn matches(&self, card: &CatalogCard) -> bool {
        let term = self.search.trim().to_lowercase();
        let matches_search = term.is_empty()
            || match card.kind() {
                CardKind::Repository => card.attr("name").to_lowercase().contains(&term),
                CardKind::Issue => {
                    card.attr("title").to_lowercase().contains(&term)
                        || card.attr("repo").to_lowercase().contains(&term)
                }
            };

        let matches_lang = self.language == FACET_ALL || card.attr("lang") == self.language;
        let matches_diff = self.difficulty == FACET_ALL || card.attr("difficulty") == self.difficulty;

        matches_search && matches_lang && matches_diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_card(name: &str, lang: &str, difficulty: &str) -> CatalogCard {
        CatalogCard::new(CardKind::Repository)
            .with_attr("name", name)
            .with_attr("lang", lang)
            .with_attr("difficulty", difficulty)
    }

    #[test]
    fn empty_search_matches_everything() {
        let filters = FilterState::default();
        assert!(filters.matches(&repo_card("octo/widgets", "Rust", "easy")));
        assert!(filters.matches(&CatalogCard::new(CardKind::Repository)));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filters = FilterState {
            search: "  WiDg ".into(),
            ..Default::default()
        };
        assert!(filters.matches(&repo_card("octo/Widgets", "Rust", "easy")));
        assert!(!filters.matches(&repo_card("octo/gears", "Rust", "easy")));
    }

    #[test]
    fn issue_search_also_matches_owning_repo() {
        let filters = FilterState {
            search: "widgets".into(),
            ..Default::default()
        };
        let issue = CatalogCard::new(CardKind::Issue)
            .with_attr("title", "Fix panic on empty input")
            .with_attr("repo", "octo/widgets");
        assert!(filters.matches(&issue));
    }

    #[test]
    fn facets_are_equality_with_all_sentinel() {
        let filters = FilterState {
            language: "Rust".into(),
            difficulty: "easy".into(),
            ..Default::default()
        };
        assert!(filters.matches(&repo_card("a/b", "Rust", "easy")));
        assert!(!filters.matches(&repo_card("a/b", "Go", "easy")));
        assert!(!filters.matches(&repo_card("a/b", "Rust", "hard")));
        // A card missing the annotation reads as "" and fails the facet.
        assert!(!filters.matches(&CatalogCard::new(CardKind::Repository).with_attr("name", "a/b")));
    }
}
