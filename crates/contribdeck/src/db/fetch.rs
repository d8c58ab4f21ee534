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

//! Bounded multi-page retrieval. The backend silently caps any single
//! response at an undocumented row limit, so a complete result set has to be
//! reassembled from successive range-bounded queries over one consistent
//! sort order.

use crate::db::connection::SurrealConnection;
use async_trait::async_trait;

/// Rows requested per range query (the inclusive range `[from, from + RANGE_STEP]`).
pub const RANGE_STEP: usize = 999;

/// Smallest plausible value for the backend's per-response row cap. A
/// response shorter than this, when at least this much was requested, is
/// taken as proof of exhaustion rather than a capped block.
pub const MIN_ROW_CAP: usize = 100;

/// Default upper bound on the total number of records retrieved.
pub const DEFAULT_MAX_RECORDS: usize = 5000;

/// Errors surfaced by catalog retrieval. Any failure aborts the whole
/// multi-page retrieval; partial data is never returned.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("invalid range request: {0}")]
    InvalidRequest(String),
    #[error("backend query failed: {0}")]
    Backend(String),
    #[error("failed to decode record: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<surrealdb::Error> for RetrievalError {
    fn from(e: surrealdb::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

/// A range-bounded query: projection over a table with a fixed sort order.
///
/// The same column and direction must be used for every sub-query of one
/// retrieval; a stable total order is what guarantees no record is skipped
/// or duplicated across range boundaries.
#[derive(Debug, Clone)]
pub struct RangeRequest {
    pub table: String,
    pub projection: String,
    pub order_by: String,
    pub ascending: bool,
}

impl RangeRequest {
    pub fn new(
        table: impl Into<String>,
        projection: impl Into<String>,
        order_by: impl Into<String>,
        ascending: bool,
    ) -> Self {
        Self {
            table: table.into(),
            projection: projection.into(),
            order_by: order_by.into(),
            ascending,
        }
    }

    fn validate(&self) -> Result<(), RetrievalError> {
        if self.table.trim().is_empty() {
            return Err(RetrievalError::InvalidRequest("table must be non-empty".into()));
        }
        if self.projection.trim().is_empty() {
            return Err(RetrievalError::InvalidRequest("projection must be non-empty".into()));
        }
        if self.order_by.trim().is_empty() {
            return Err(RetrievalError::InvalidRequest("order column must be non-empty".into()));
        }
        Ok(())
    }
}

/// Source of range-bounded rows. `from` and `to` are inclusive row offsets
/// within the request's sort order; implementations may return fewer rows
/// than requested (the backend cap), but never more.
#[async_trait]
pub trait RangeSource {
    async fn fetch_range(
        &self,
        request: &RangeRequest,
        from: usize,
        to: usize,
    ) -> Result<Vec<serde_json::Value>, RetrievalError>;
}

#[async_trait]
impl RangeSource for SurrealConnection {
    async fn fetch_range(
        &self,
        request: &RangeRequest,
        from: usize,
        to: usize,
    ) -> Result<Vec<serde_json::Value>, RetrievalError> {
        let limit = to - from + 1;
        let direction = if request.ascending { "ASC" } else { "DESC" };
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {} {} LIMIT {} START {}",
            request.projection, request.table, request.order_by, direction, limit, from
        );
        let mut response = self.query(&sql).await?;
        let rows: Vec<serde_json::Value> = response.take(0)?;
        Ok(rows)
    }
}

/// Fetch every record of `request`'s projection, up to `max_records`,
/// reassembling the full ordered result set from range-bounded queries.
///
/// Sub-queries are issued strictly sequentially, one in flight at a time.
/// The offset advances by the number of rows actually returned rather than
/// by the requested step, so a backend that caps responses below the step
/// still yields a gap-free result. Retrieval stops on an empty response, on
/// the short-response exhaustion heuristic (see [`MIN_ROW_CAP`]), or once
/// `max_records` rows have accumulated.
///
/// TODO: replace the short-response heuristic with an authoritative
/// `count()` pre-query once the catalog schema grows one.
pub async fn fetch_all_records<S>(
    source: &S,
    request: &RangeRequest,
    max_records: usize,
) -> Result<Vec<serde_json::Value>, RetrievalError>
where
    S: RangeSource + Sync + ?Sized,
{
    request.validate()?;
    if max_records == 0 {
        return Err(RetrievalError::InvalidRequest("max_records must be positive".into()));
    }

    let mut all: Vec<serde_json::Value> = Vec::new();
    let mut from = 0usize;

    while all.len() < max_records {
        let to = from + RANGE_STEP;
        let rows = source.fetch_range(request, from, to).await?;

        if rows.is_empty() {
            break;
        }

        let returned = rows.len();
        all.extend(rows);

        // Advance by what actually came back, in case the backend's cap is
        // lower than the requested step.
        from += returned;

        // A response shorter than the smallest plausible cap means the data
        // is exhausted, not that we hit a capped block.
        if returned < MIN_ROW_CAP && RANGE_STEP + 1 >= MIN_ROW_CAP {
            break;
        }
    }

    // Trim if the final block overshot the bound.
    all.truncate(max_records);
    Ok(all)
}
