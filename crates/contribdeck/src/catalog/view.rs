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

use serde::{Deserialize, Serialize};

/// The navigational context a view instance serves. The context is fixed at
/// engine construction; an unrecognized context hides every card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewContext {
    Dashboard,
    Repositories,
    Issues,
    Other,
}

impl ViewContext {
    pub fn from_path(path: &str) -> Self {
        if path == "/" || path == "/index.html" {
            Self::Dashboard
        } else if path.contains("/repositories") {
            Self::Repositories
        } else if path.contains("/issues") {
            Self::Issues
        } else {
            Self::Other
        }
    }
}

/// How a collection's matches map onto a visible window. Derived from the
/// view context and the live cursors; the strategy itself never changes for
/// the lifetime of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityPolicy {
    /// Dashboard: show the first `limit` matches, grow on demand.
    ProgressiveReveal { limit: usize },
    /// List views: show one 1-indexed page of matches.
    NumberedPage { page: usize, page_size: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_detection() {
        assert_eq!(ViewContext::from_path("/"), ViewContext::Dashboard);
        assert_eq!(ViewContext::from_path("/index.html"), ViewContext::Dashboard);
        assert_eq!(
            ViewContext::from_path("/repositories"),
            ViewContext::Repositories
        );
        assert_eq!(
            ViewContext::from_path("/repositories/index.html"),
            ViewContext::Repositories
        );
        assert_eq!(ViewContext::from_path("/issues"), ViewContext::Issues);
        assert_eq!(ViewContext::from_path("/about"), ViewContext::Other);
    }
}
