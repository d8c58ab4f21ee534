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

use contribdeck::db::{
    connect, fetch_all_records, CatalogQueries, RangeRequest, SurrealConnection,
};
use std::sync::Arc;

struct TestDb {
    db: Arc<SurrealConnection>,
}

impl TestDb {
    async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        std::env::set_var("CONTRIBDECK_DISABLE_SURREAL_ENV", "1");
        std::env::set_var("CONTRIBDECK_EPHEMERAL_MEM", "1");
        let conn = connect(&None, &None, &None, "testns", "testdb").await?;
        Ok(Self { db: Arc::new(conn) })
    }

    async fn seed_repos(&self, count: usize) -> Result<(), Box<dyn std::error::Error>> {
        for i in 0..count {
            let q = format!(
                "CREATE repo CONTENT {{ full_name: \"octo/repo{i}\", name: \"repo{i}\", stars: {stars}, forks: 2, health_score: 80.0, language: \"Rust\", last_active: \"2026-07-01T00:00:00Z\", description: \"demo repo {i}\" }}",
                i = i,
                stars = 1000 - i as i64
            );
            self.db.query(&q).await?;
        }
        Ok(())
    }

    async fn seed_issues(&self, count: usize) -> Result<(), Box<dyn std::error::Error>> {
        for i in 0..count {
            let q = format!(
                "CREATE issue CONTENT {{ url: \"https://github.com/octo/widgets/issues/{i}\", repo_id: \"octo/widgets\", title: \"Fix bug {i}\", difficulty_score: 12.5, language: \"Rust\", labels: {{ tags: [\"good first issue\"] }}, created_at: \"2026-06-{day:02}T00:00:00Z\" }}",
                i = i,
                day = (i % 28) + 1
            );
            self.db.query(&q).await?;
        }
        Ok(())
    }
}

#[tokio::test]
async fn lists_repositories_most_starred_first() -> Result<(), Box<dyn std::error::Error>> {
    let t = TestDb::new().await?;
    t.seed_repos(12).await?;

    let queries = CatalogQueries::new(t.db.clone());
    let repos = queries.list_repos(5000).await?;

    assert_eq!(repos.len(), 12);
    assert!(
        repos.windows(2).all(|w| w[0].stars >= w[1].stars),
        "repositories come back in descending star order"
    );
    assert_eq!(repos[0].full_name, "octo/repo0");
    assert_eq!(repos[0].language.as_deref(), Some("Rust"));
    // health 80 -> difficulty score 20 -> medium
    assert_eq!(repos[0].difficulty(), "medium");
    Ok(())
}

#[tokio::test]
async fn lists_issues_with_labels_and_difficulty() -> Result<(), Box<dyn std::error::Error>> {
    let t = TestDb::new().await?;
    t.seed_issues(5).await?;

    let queries = CatalogQueries::new(t.db.clone());
    let issues = queries.list_issues(5000).await?;

    assert_eq!(issues.len(), 5);
    for issue in &issues {
        assert_eq!(issue.repo_id, "octo/widgets");
        assert_eq!(issue.difficulty(), "easy");
        assert_eq!(issue.tags(), vec!["good first issue"]);
    }
    Ok(())
}

#[tokio::test]
async fn range_queries_reassemble_the_full_table() -> Result<(), Box<dyn std::error::Error>> {
    let t = TestDb::new().await?;
    t.seed_repos(12).await?;

    let request = RangeRequest::new("repo", "full_name, name, stars", "stars", false);
    let rows = fetch_all_records(&*t.db, &request, 5000).await?;
    assert_eq!(rows.len(), 12);

    // The bound truncates, it never errors.
    let rows = fetch_all_records(&*t.db, &request, 7).await?;
    assert_eq!(rows.len(), 7);
    Ok(())
}

#[tokio::test]
async fn paged_sql_windows_line_up() -> Result<(), Box<dyn std::error::Error>> {
    let t = TestDb::new().await?;
    t.seed_repos(10).await?;

    // Two windows of four and a final partial window of two.
    for (start, expected) in [(0usize, 4usize), (4, 4), (8, 2)] {
        let sql = format!(
            "SELECT full_name FROM repo ORDER BY stars DESC LIMIT {} START {}",
            4, start
        );
        let mut res = t.db.query_with_binds(&sql, vec![]).await?;
        let rows: Vec<serde_json::Value> = res.take(0)?;
        assert_eq!(rows.len(), expected, "window starting at {}", start);
    }
    Ok(())
}
