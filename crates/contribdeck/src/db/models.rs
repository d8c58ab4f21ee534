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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository row as written by the scraper. Columns may be missing on
/// older rows, so everything beyond the identity fields is defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoRecord {
    pub full_name: String,
    pub name: String,
    #[serde(default)]
    pub stars: i64,
    #[serde(default)]
    pub forks: i64,
    #[serde(default)]
    pub health_score: Option<f64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub last_active: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RepoRecord {
    /// Categorical difficulty for the filter controls. Health is the inverse
    /// of the scraper's difficulty score, so an unhealthy repo is a hard one.
    pub fn difficulty(&self) -> &'static str {
        difficulty_bucket(self.health_score.map(|h| 100.0 - h))
    }
}

/// An open issue row. `repo_id` is the owning repository's `full_name`;
/// `language` is denormalized from the repository at scrape time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
    pub url: String,
    pub repo_id: String,
    pub title: String,
    #[serde(default)]
    pub difficulty_score: Option<f64>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub labels: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl IssueRecord {
    pub fn difficulty(&self) -> &'static str {
        difficulty_bucket(self.difficulty_score)
    }

    /// Label tags from the scraper's `{"tags": [...], ...}` payload.
    pub fn tags(&self) -> Vec<String> {
        self.labels
            .as_ref()
            .and_then(|l| l.get("tags"))
            .and_then(|t| t.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Map a continuous difficulty score onto the categorical buckets used by
/// the difficulty selector. An absent score yields the empty bucket, which
/// only the "all" facet matches.
pub fn difficulty_bucket(score: Option<f64>) -> &'static str {
    match score {
        None => "",
        Some(s) if s <= 15.0 => "easy",
        Some(s) if s <= 25.0 => "medium",
        Some(_) => "hard",
    }
}

/// Compact relative-age label ("5h ago", "3d ago") for an RFC3339 timestamp.
/// Unparseable timestamps yield `None` rather than an error.
pub fn relative_age(timestamp: &str, now: DateTime<Utc>) -> Option<String> {
    let t = DateTime::parse_from_rfc3339(timestamp).ok()?.with_timezone(&Utc);
    let hours = (now - t).num_hours().max(0);
    if hours < 24 {
        Some(format!("{}h ago", hours))
    } else {
        Some(format!("{}d ago", hours / 24))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_buckets() {
        assert_eq!(difficulty_bucket(None), "");
        assert_eq!(difficulty_bucket(Some(0.0)), "easy");
        assert_eq!(difficulty_bucket(Some(15.0)), "easy");
        assert_eq!(difficulty_bucket(Some(15.1)), "medium");
        assert_eq!(difficulty_bucket(Some(25.0)), "medium");
        assert_eq!(difficulty_bucket(Some(40.0)), "hard");
    }

    #[test]
    fn repo_difficulty_inverts_health() {
        let repo = RepoRecord {
            full_name: "octo/widgets".into(),
            name: "widgets".into(),
            stars: 42,
            forks: 3,
            health_score: Some(90.0),
            language: Some("Rust".into()),
            last_active: None,
            description: None,
        };
        // health 90 -> difficulty score 10 -> easy
        assert_eq!(repo.difficulty(), "easy");
    }

    #[test]
    fn issue_tags_tolerate_missing_labels() {
        let issue = IssueRecord {
            url: "https://example.com/1".into(),
            repo_id: "octo/widgets".into(),
            title: "Fix panic".into(),
            difficulty_score: None,
            language: None,
            labels: None,
            created_at: None,
        };
        assert!(issue.tags().is_empty());

        let labelled = IssueRecord {
            labels: Some(serde_json::json!({"tags": ["good first issue", "bug"]})),
            ..issue
        };
        assert_eq!(labelled.tags(), vec!["good first issue", "bug"]);
    }

    #[test]
    fn relative_age_labels() {
        let now = DateTime::parse_from_rfc3339("2026-08-07T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            relative_age("2026-08-07T09:00:00Z", now).as_deref(),
            Some("3h ago")
        );
        assert_eq!(
            relative_age("2026-08-01T12:00:00Z", now).as_deref(),
            Some("6d ago")
        );
        assert_eq!(relative_age("not-a-timestamp", now), None);
    }
}
