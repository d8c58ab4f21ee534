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

use contribdeck::catalog::{CatalogCard, CatalogEngine, ViewContext, DEFAULT_PAGE_SIZE};
use contribdeck::db::{IssueRecord, RepoRecord};
use minijinja::{context, Environment};
use std::fs;

fn sample_repo(i: usize) -> RepoRecord {
    RepoRecord {
        full_name: format!("octo/repo{}", i),
        name: format!("repo{}", i),
        stars: 100 + i as i64,
        forks: 4,
        health_score: Some(85.0),
        language: Some("Rust".to_string()),
        last_active: Some("2026-07-01T00:00:00Z".to_string()),
        description: Some("A demo repository".to_string()),
    }
}

fn sample_issue(i: usize) -> IssueRecord {
    IssueRecord {
        url: format!("https://github.com/octo/repo0/issues/{}", i),
        repo_id: "octo/repo0".to_string(),
        title: format!("Fix bug {}", i),
        difficulty_score: Some(10.0),
        language: Some("Rust".to_string()),
        labels: Some(serde_json::json!({"tags": ["good first issue"]})),
        created_at: Some("2026-07-15T00:00:00Z".to_string()),
    }
}

fn template_env() -> Environment<'static> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let mut env = Environment::new();
    for name in ["base", "dashboard", "repositories", "issues"] {
        let path = format!("{}/static/webui/{}.html", manifest_dir, name);
        let source = fs::read_to_string(&path).expect("read template");
        env.add_template_owned(name.to_string(), source).unwrap();
    }
    env
}

fn template_context(view: ViewContext, view_name: &str) -> minijinja::Value {
    let repos: Vec<RepoRecord> = (0..3).map(sample_repo).collect();
    let issues: Vec<IssueRecord> = (0..2).map(sample_issue).collect();
    let repo_cards: Vec<CatalogCard> = repos.iter().map(CatalogCard::from_repo).collect();
    let issue_cards: Vec<CatalogCard> = issues.iter().map(CatalogCard::from_issue).collect();
    let plan = CatalogEngine::new(view, &repo_cards, &issue_cards).apply_filters();

    let repo_values: Vec<serde_json::Value> = repos
        .iter()
        .map(|r| {
            let mut v = serde_json::to_value(r).unwrap();
            v["difficulty"] = serde_json::json!(r.difficulty());
            v["last_active_label"] = serde_json::json!("5d ago");
            v
        })
        .collect();
    let issue_values: Vec<serde_json::Value> = issues
        .iter()
        .map(|i| {
            let mut v = serde_json::to_value(i).unwrap();
            v["difficulty"] = serde_json::json!(i.difficulty());
            v["tags"] = serde_json::json!(i.tags());
            v["created_label"] = serde_json::json!("2d ago");
            v
        })
        .collect();

    context! {
        title => "Contribdeck",
        view => view_name,
        repos => repo_values,
        issues => issue_values,
        languages => vec!["Rust".to_string()],
        page_size => DEFAULT_PAGE_SIZE,
        reveal_hold_ms => 400u64,
        initial_plan_json => serde_json::to_string(&plan).unwrap(),
    }
}

#[test]
fn dashboard_template_renders_annotated_cards() {
    let env = template_env();
    let tmpl = env.get_template("dashboard").unwrap();
    let html = tmpl
        .render(template_context(ViewContext::Dashboard, "dashboard"))
        .expect("render should succeed");

    assert!(html.contains(r#"data-type="repo""#));
    assert!(html.contains(r#"data-name="octo/repo0""#));
    assert!(html.contains(r#"data-type="issue""#));
    assert!(html.contains(r#"data-repo="octo/repo0""#));
    assert!(html.contains(r#"id="showMoreIssuesBtn""#));
    assert!(html.contains("good first issue"));
    // The engine's bootstrap plan is embedded for the page script.
    assert!(html.contains("\"match_count\":3"));
}

#[test]
fn repositories_template_renders_the_pagination_mount() {
    let env = template_env();
    let tmpl = env.get_template("repositories").unwrap();
    let html = tmpl
        .render(template_context(ViewContext::Repositories, "repositories"))
        .expect("render should succeed");

    assert!(html.contains(r#"id="paginationContainer""#));
    assert!(html.contains(r#"id="searchInput""#));
    assert!(html.contains(r#"data-difficulty="easy""#));
}

#[test]
fn issues_template_renders_issue_cards() {
    let env = template_env();
    let tmpl = env.get_template("issues").unwrap();
    let html = tmpl
        .render(template_context(ViewContext::Issues, "issues"))
        .expect("render should succeed");

    assert!(html.contains(r#"data-title="Fix bug 0""#));
    assert!(html.contains(r#"id="noIssuesMsg""#));
}
