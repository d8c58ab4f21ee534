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

use crate::db::models::{IssueRecord, RepoRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// What kind of item a card represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Repository,
    Issue,
}

/// One displayable catalog item as seen through its rendered annotations.
///
/// The rendering layer writes the annotations; the engine only ever reads
/// them. A missing annotation reads as the empty string — it is never an
/// error, it just fails any non-"all" facet comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCard {
    kind: CardKind,
    attrs: BTreeMap<String, String>,
}

impl CatalogCard {
    pub fn new(kind: CardKind) -> Self {
        Self {
            kind,
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// Annotation lookup; absent annotations read as "".
    pub fn attr(&self, name: &str) -> &str {
        self.attrs.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn from_repo(record: &RepoRecord) -> Self {
        Self::new(CardKind::Repository)
            .with_attr("name", &record.full_name)
            .with_attr("lang", record.language.as_deref().unwrap_or(""))
            .with_attr("difficulty", record.difficulty())
    }

    pub fn from_issue(record: &IssueRecord) -> Self {
        Self::new(CardKind::Issue)
            .with_attr("title", &record.title)
            .with_attr("repo", &record.repo_id)
            .with_attr("lang", record.language.as_deref().unwrap_or(""))
            .with_attr("difficulty", record.difficulty())
    }
}
