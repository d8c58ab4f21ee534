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

use crate::db::connection::SurrealConnection;
use crate::db::fetch::{fetch_all_records, RangeRequest, RetrievalError};
use crate::db::models::{IssueRecord, RepoRecord};
use std::sync::Arc;

// Fixed projections: SELECT * would drag record ids along in a shape the
// models don't expect, and the column set is the scraper's write contract.
const REPO_FIELDS: &str =
    "full_name, name, stars, forks, health_score, language, last_active, description";
const ISSUE_FIELDS: &str =
    "url, repo_id, title, difficulty_score, language, labels, created_at";

/// Read-side catalog queries over a shared backend connection.
#[derive(Clone)]
pub struct CatalogQueries {
    pub db: Arc<SurrealConnection>,
}

impl CatalogQueries {
    pub fn new(db: Arc<SurrealConnection>) -> Self {
        Self { db }
    }

    /// All repositories, most-starred first, up to `max_records`.
    pub async fn list_repos(&self, max_records: usize) -> Result<Vec<RepoRecord>, RetrievalError> {
        let request = RangeRequest::new("repo", REPO_FIELDS, "stars", false);
        let rows = fetch_all_records(&*self.db, &request, max_records).await?;
        decode_rows(rows, "repo")
    }

    /// All open issues, newest first, up to `max_records`.
    pub async fn list_issues(
        &self,
        max_records: usize,
    ) -> Result<Vec<IssueRecord>, RetrievalError> {
        let request = RangeRequest::new("issue", ISSUE_FIELDS, "created_at", false);
        let rows = fetch_all_records(&*self.db, &request, max_records).await?;
        decode_rows(rows, "issue")
    }
}

fn decode_rows<T: serde::de::DeserializeOwned>(
    rows: Vec<serde_json::Value>,
    table: &str,
) -> Result<Vec<T>, RetrievalError> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| {
                log::error!("failed to decode {} row: {}", table, e);
                RetrievalError::from(e)
            })
        })
        .collect()
}
