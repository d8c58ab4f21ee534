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

// Catalog view layer: cards and their annotations, the filter predicate,
// view contexts and visibility policies, pagination-control generation, and
// the engine tying them together.

pub mod card;
pub mod engine;
pub mod filter;
pub mod paging;
pub mod spinner;
pub mod view;

pub use card::{CardKind, CatalogCard};
pub use engine::{CatalogEngine, CollectionView, RenderPlan, DEFAULT_PAGE_SIZE};
pub use filter::{FilterState, FACET_ALL};
pub use paging::{build_pagination, total_pages, PageEntry, PageNav, PaginationControl};
pub use spinner::{RevealSpinner, REVEAL_HOLD};
pub use view::{ViewContext, VisibilityPolicy};
