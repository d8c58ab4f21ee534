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

//! The reconciliation engine. One engine instance owns the filter state and
//! the pagination cursors for a view; the card collections themselves are
//! owned by the page and only borrowed here. Every control event funnels
//! into [`CatalogEngine::apply_filters`], which recomputes the match sets
//! and the visible windows in one pass per collection.

use crate::catalog::card::{CardKind, CatalogCard};
use crate::catalog::filter::FilterState;
use crate::catalog::paging::{build_pagination, PaginationControl};
use crate::catalog::view::{ViewContext, VisibilityPolicy};
use serde::Serialize;

/// Matches shown per page, and the reveal-limit increment on the dashboard.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Render outcome for one collection: per-card visibility in original
/// collection order, plus the derived control states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionView {
    pub visible: Vec<bool>,
    pub match_count: usize,
    pub show_empty_state: bool,
    pub show_reveal_more: bool,
}

impl CollectionView {
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }
}

/// Full render outcome of one `apply_filters` pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    pub repos: CollectionView,
    pub issues: CollectionView,
    pub pagination: Option<PaginationControl>,
}

/// Filter/pagination state for one view over the repository and issue
/// collections.
#[derive(Debug, Clone)]
pub struct CatalogEngine<'a> {
    context: ViewContext,
    page_size: usize,
    filters: FilterState,
    repos_limit: usize,
    issues_limit: usize,
    current_page: usize,
    repo_cards: &'a [CatalogCard],
    issue_cards: &'a [CatalogCard],
}

impl<'a> CatalogEngine<'a> {
    pub fn new(
        context: ViewContext,
        repo_cards: &'a [CatalogCard],
        issue_cards: &'a [CatalogCard],
    ) -> Self {
        Self {
            context,
            page_size: DEFAULT_PAGE_SIZE,
            filters: FilterState::default(),
            repos_limit: DEFAULT_PAGE_SIZE,
            issues_limit: DEFAULT_PAGE_SIZE,
            current_page: 1,
            repo_cards,
            issue_cards,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.reset_cursors();
        self
    }

    /// Restore a filter snapshot without treating it as a control event
    /// (cursors are left alone; used when rebuilding a view from request
    /// parameters).
    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.current_page = page.max(1);
        self
    }

    pub fn with_reveal_limits(mut self, repos: usize, issues: usize) -> Self {
        self.repos_limit = repos.max(self.page_size);
        self.issues_limit = issues.max(self.page_size);
        self
    }

    pub fn context(&self) -> ViewContext {
        self.context
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn reveal_limit(&self, kind: CardKind) -> usize {
        match kind {
            CardKind::Repository => self.repos_limit,
            CardKind::Issue => self.issues_limit,
        }
    }

    /// The visibility strategy governing `kind` under this view context.
    pub fn policy(&self, kind: CardKind) -> VisibilityPolicy {
        match self.context {
            ViewContext::Dashboard => VisibilityPolicy::ProgressiveReveal {
                limit: self.reveal_limit(kind),
            },
            _ => VisibilityPolicy::NumberedPage {
                page: self.current_page,
                page_size: self.page_size,
            },
        }
    }

    // --- control events -------------------------------------------------

    pub fn set_search(&mut self, text: &str) {
        self.filters.search = text.to_string();
        self.reset_cursors();
    }

    pub fn set_language(&mut self, language: &str) {
        self.filters.language = language.to_string();
        self.reset_cursors();
    }

    pub fn set_difficulty(&mut self, difficulty: &str) {
        self.filters.difficulty = difficulty.to_string();
        self.reset_cursors();
    }

    /// Jump to a page selected from the pagination control. The control only
    /// ever offers in-range targets; the cursor is floored at 1 so the
    /// transition stays total.
    pub fn select_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Grow the dashboard reveal limit for one collection by a page size.
    pub fn reveal_more(&mut self, kind: CardKind) {
        match kind {
            CardKind::Repository => self.repos_limit += self.page_size,
            CardKind::Issue => self.issues_limit += self.page_size,
        }
    }

    // A changed filter invalidates the user's position in the old match
    // ordering, so every cursor goes back to its initial value.
    fn reset_cursors(&mut self) {
        self.repos_limit = self.page_size;
        self.issues_limit = self.page_size;
        self.current_page = 1;
    }

    // --- rendering ------------------------------------------------------

    /// Recompute match sets, visible windows, and control states for both
    /// collections. Pure with respect to the engine: calling it twice with
    /// unchanged state yields an identical plan.
    pub fn apply_filters(&self) -> RenderPlan {
        let repos = self.collection_view(self.repo_cards, CardKind::Repository);
        let issues = self.collection_view(self.issue_cards, CardKind::Issue);

        let pagination = match self.context {
            ViewContext::Repositories => {
                build_pagination(repos.match_count, self.current_page, self.page_size)
            }
            ViewContext::Issues => {
                build_pagination(issues.match_count, self.current_page, self.page_size)
            }
            ViewContext::Dashboard | ViewContext::Other => None,
        };

        RenderPlan {
            repos,
            issues,
            pagination,
        }
    }

    fn collection_view(&self, cards: &[CatalogCard], kind: CardKind) -> CollectionView {
        let limit = self.reveal_limit(kind);
        // On a list view only the matching collection is paged; the other
        // collection has no place on the page and stays hidden.
        let paged_here = matches!(
            (self.context, kind),
            (ViewContext::Repositories, CardKind::Repository)
                | (ViewContext::Issues, CardKind::Issue)
        );
        let window_start = (self.current_page - 1) * self.page_size;
        let window_end = window_start + self.page_size;

        let mut visible = vec![false; cards.len()];
        let mut match_count = 0usize;
        let mut shown = 0usize;

        for (idx, card) in cards.iter().enumerate() {
            if !self.filters.matches(card) {
                continue;
            }
            match_count += 1;
            let show = match self.context {
                ViewContext::Dashboard => shown < limit,
                ViewContext::Repositories | ViewContext::Issues => {
                    // match_count is the 1-indexed position within the match
                    // sequence; the page is the half-open slice
                    // [window_start, window_end) of that sequence.
                    paged_here && match_count > window_start && match_count <= window_end
                }
                ViewContext::Other => false,
            };
            if show {
                visible[idx] = true;
                shown += 1;
            }
        }

        CollectionView {
            match_count,
            show_empty_state: match_count == 0 && !cards.is_empty(),
            show_reveal_more: self.context == ViewContext::Dashboard && match_count > limit,
            visible,
        }
    }
}
