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

// Database layer for the catalog: connection handling, bounded multi-page
// retrieval, record models, and the read-side queries built on top.

pub mod connection;
pub mod fetch;
pub mod models;
pub mod queries;

pub use connection::{connect, SurrealConnection};
pub use fetch::{
    fetch_all_records, RangeRequest, RangeSource, RetrievalError, DEFAULT_MAX_RECORDS,
    MIN_ROW_CAP, RANGE_STEP,
};
pub use models::{difficulty_bucket, relative_age, IssueRecord, RepoRecord};
pub use queries::CatalogQueries;

/// A database handle combining connection setup with the catalog queries.
#[derive(Clone)]
pub struct Database {
    queries: CatalogQueries,
}

impl Database {
    /// Connect with the given parameters (see [`connection::connect`] for
    /// the URL/credential resolution order).
    pub async fn new(url: Option<&str>, ns: &str, db_name: &str) -> anyhow::Result<Self> {
        let conn = connect(&url.map(|s| s.to_string()), &None, &None, ns, db_name).await?;
        let queries = CatalogQueries::new(std::sync::Arc::new(conn));
        Ok(Self { queries })
    }

    /// The underlying connection, for tests and ad-hoc queries.
    pub fn connection(&self) -> &std::sync::Arc<SurrealConnection> {
        &self.queries.db
    }
}

impl std::ops::Deref for Database {
    type Target = CatalogQueries;

    fn deref(&self) -> &Self::Target {
        &self.queries
    }
}
