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

//! Pagination-control generation for the numbered list views. The control is
//! rebuilt from scratch on every render: Prev/Next, a bounded window of page
//! numbers around the current page, explicit first/last pages, and ellipsis
//! placeholders for any gap wider than one page.

use serde::Serialize;

/// A Prev/Next affordance. `target` is clamped into the valid page range so
/// a disabled affordance still carries a well-formed page number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageNav {
    pub target: usize,
    pub disabled: bool,
}

/// One entry in the numbered strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageEntry {
    Number { page: usize, active: bool },
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationControl {
    pub prev: PageNav,
    pub entries: Vec<PageEntry>,
    pub next: PageNav,
    pub total_pages: usize,
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size)
}

/// Build the control for `total_items` matches, or `None` when a single page
/// (or none) holds everything.
pub fn build_pagination(
    total_items: usize,
    current_page: usize,
    page_size: usize,
) -> Option<PaginationControl> {
    let total = total_pages(total_items, page_size);
    if total <= 1 {
        return None;
    }

    // Window of up to five numbers centered on the current page, shifted
    // near either boundary so five stay visible when the page count allows.
    let mut start = current_page.saturating_sub(2).max(1);
    let mut end = (current_page + 2).min(total);
    if current_page <= 3 {
        end = total.min(5);
    }
    if current_page + 2 >= total {
        start = total.saturating_sub(4).max(1);
    }

    let mut entries = Vec::new();
    if start > 1 {
        entries.push(PageEntry::Number {
            page: 1,
            active: false,
        });
        if start > 2 {
            entries.push(PageEntry::Ellipsis);
        }
    }
    for page in start..=end {
        entries.push(PageEntry::Number {
            page,
            active: page == current_page,
        });
    }
    if end < total {
        if end < total - 1 {
            entries.push(PageEntry::Ellipsis);
        }
        entries.push(PageEntry::Number {
            page: total,
            active: false,
        });
    }

    Some(PaginationControl {
        prev: PageNav {
            target: current_page.saturating_sub(1).max(1),
            disabled: current_page == 1,
        },
        entries,
        next: PageNav {
            target: (current_page + 1).min(total),
            disabled: current_page >= total,
        },
        total_pages: total,
    })
}
