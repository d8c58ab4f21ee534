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

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use clap::Parser;
use minijinja::{context, Environment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use contribdeck::catalog::{
    CatalogCard, CatalogEngine, FilterState, RenderPlan, ViewContext, DEFAULT_PAGE_SIZE,
    FACET_ALL, REVEAL_HOLD,
};
use contribdeck::db::{relative_age, Database, IssueRecord, RepoRecord, DEFAULT_MAX_RECORDS};

// Embed the templates so the binary can serve them directly.
const BASE_TEMPLATE: &str = include_str!("../../static/webui/base.html");
const DASHBOARD_TEMPLATE: &str = include_str!("../../static/webui/dashboard.html");
const REPOSITORIES_TEMPLATE: &str = include_str!("../../static/webui/repositories.html");
const ISSUES_TEMPLATE: &str = include_str!("../../static/webui/issues.html");

#[derive(Parser)]
#[command(name = "contribdeck-webui")]
#[command(about = "Web UI for browsing the Contribdeck repository and issue catalog")]
#[command(long_about = "
Contribdeck WebUI serves a browsable catalog of open-source repositories and
good-first-issues. The catalog is loaded once at startup from a SurrealDB
instance (or the embedded in-memory engine when no URL is configured) and
filtered entirely in the view layer.

Examples:
    # Run with default settings (embedded SurrealDB)
    contribdeck-webui

    # Connect to remote SurrealDB
    contribdeck-webui --surreal-url http://localhost:8000

Environment Variables:
    CONTRIBDECK_HOST         Web server host (default: 127.0.0.1)
    CONTRIBDECK_PORT         Web server port (default: 3000)
    SURREALDB_URL            SurrealDB URL (optional, falls back to embedded)
    SURREAL_NS               SurrealDB namespace (default: contribdeck)
    SURREAL_DB               SurrealDB database (default: catalog)
    CONTRIBDECK_LOG_LEVEL    Log level (default: info)
    CONTRIBDECK_CORS_ALL     Enable CORS for all origins (default: false)
")]
struct Args {
    /// Web server host to bind to
    #[arg(long, help = "Web server host (env: CONTRIBDECK_HOST)")]
    host: Option<String>,

    /// Web server port to listen on
    #[arg(long, help = "Web server port (env: CONTRIBDECK_PORT)")]
    port: Option<u16>,

    /// SurrealDB URL (optional, falls back to embedded database if not provided)
    #[arg(long, help = "SurrealDB URL (env: SURREALDB_URL)")]
    surreal_url: Option<String>,

    /// SurrealDB namespace
    #[arg(long, help = "SurrealDB namespace (env: SURREAL_NS)")]
    surreal_ns: Option<String>,

    /// SurrealDB database name
    #[arg(long, help = "SurrealDB database (env: SURREAL_DB)")]
    surreal_db: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, help = "Log level (env: CONTRIBDECK_LOG_LEVEL)")]
    log_level: Option<String>,

    /// Enable CORS for all origins (useful for development)
    #[arg(long, help = "Enable CORS for all origins (env: CONTRIBDECK_CORS_ALL)")]
    cors_all: bool,

    /// Upper bound on catalog records loaded per collection
    #[arg(long, default_value_t = DEFAULT_MAX_RECORDS)]
    max_catalog_records: usize,
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    surreal_url: Option<String>,
    surreal_ns: String,
    surreal_db: String,
    log_level: String,
    cors_all: bool,
    max_catalog_records: usize,
}

impl Config {
    fn from_args(args: Args) -> Self {
        Self {
            host: args.host.unwrap_or_else(|| {
                std::env::var("CONTRIBDECK_HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
            }),
            port: args.port.unwrap_or_else(|| {
                std::env::var("CONTRIBDECK_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3000)
            }),
            surreal_url: args
                .surreal_url
                .or_else(|| std::env::var("SURREALDB_URL").ok()),
            surreal_ns: args.surreal_ns.unwrap_or_else(|| {
                std::env::var("SURREAL_NS").unwrap_or_else(|_| "contribdeck".to_string())
            }),
            surreal_db: args.surreal_db.unwrap_or_else(|| {
                std::env::var("SURREAL_DB").unwrap_or_else(|_| "catalog".to_string())
            }),
            log_level: args.log_level.unwrap_or_else(|| {
                std::env::var("CONTRIBDECK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
            }),
            cors_all: args.cors_all
                || std::env::var("CONTRIBDECK_CORS_ALL")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(false),
            max_catalog_records: args.max_catalog_records,
        }
    }
}

/// The catalog snapshot loaded at startup. The page lifetime owns the item
/// collections; view engines only borrow the cards.
struct Catalog {
    repos: Vec<RepoRecord>,
    issues: Vec<IssueRecord>,
    repo_cards: Vec<CatalogCard>,
    issue_cards: Vec<CatalogCard>,
    languages: Vec<String>,
}

impl Catalog {
    async fn load(db: &Database, max_records: usize) -> anyhow::Result<Self> {
        let repos = db.list_repos(max_records).await?;
        let issues = db.list_issues(max_records).await?;
        let repo_cards: Vec<CatalogCard> = repos.iter().map(CatalogCard::from_repo).collect();
        let issue_cards: Vec<CatalogCard> = issues.iter().map(CatalogCard::from_issue).collect();

        let mut languages: Vec<String> = repos
            .iter()
            .filter_map(|r| r.language.clone())
            .chain(issues.iter().filter_map(|i| i.language.clone()))
            .filter(|l| !l.is_empty())
            .collect();
        languages.sort();
        languages.dedup();

        Ok(Self {
            repos,
            issues,
            repo_cards,
            issue_cards,
            languages,
        })
    }
}

#[derive(Clone)]
struct AppState {
    catalog: Arc<Catalog>,
    templates: Environment<'static>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::from_args(args);

    // Initialize logging with the configured level.
    std::env::set_var("RUST_LOG", &config.log_level);
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    builder
        .filter_module("hyper", log::LevelFilter::Warn)
        .filter_module("h2", log::LevelFilter::Warn)
        .filter_module("tower_http", log::LevelFilter::Warn);
    builder.init();

    log::info!("Starting Contribdeck WebUI with configuration:");
    log::info!("  Host: {}", config.host);
    log::info!("  Port: {}", config.port);
    log::info!(
        "  SurrealDB URL: {}",
        config
            .surreal_url
            .as_ref()
            .map(|_| "[configured]")
            .unwrap_or("[embedded]")
    );
    log::info!("  SurrealDB Namespace: {}", config.surreal_ns);
    log::info!("  SurrealDB Database: {}", config.surreal_db);
    log::info!("  Log Level: {}", config.log_level);
    log::info!("  CORS All: {}", config.cors_all);
    log::info!("  Max Catalog Records: {}", config.max_catalog_records);

    let db = match Database::new(
        config.surreal_url.as_deref(),
        &config.surreal_ns,
        &config.surreal_db,
    )
    .await
    {
        Ok(db) => {
            log::info!("Successfully connected to SurrealDB");
            db
        }
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            return Err(e);
        }
    };

    let catalog = Catalog::load(&db, config.max_catalog_records).await?;
    log::info!(
        "Catalog loaded: {} repositories, {} issues, {} languages",
        catalog.repos.len(),
        catalog.issues.len(),
        catalog.languages.len()
    );

    let mut templates = Environment::new();
    templates.add_template("base", BASE_TEMPLATE)?;
    templates.add_template("dashboard", DASHBOARD_TEMPLATE)?;
    templates.add_template("repositories", REPOSITORIES_TEMPLATE)?;
    templates.add_template("issues", ISSUES_TEMPLATE)?;
    log::info!("Templates loaded successfully");

    let state = AppState {
        catalog: Arc::new(catalog),
        templates,
    };

    let cors_layer = if config.cors_all {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([axum::http::Method::GET])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    };

    let app = Router::new()
        .route("/", get(dashboard_handler))
        .route("/repositories", get(repositories_handler))
        .route("/issues", get(issues_handler))
        .route("/health", get(health_handler))
        .route("/api/view", get(view_api_handler))
        .route("/api/repos", get(repos_api_handler))
        .route("/api/issues", get(issues_api_handler))
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors_layer)
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port).parse::<SocketAddr>()?;
    log::info!("Starting web UI server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Query parameters for a view evaluation: which view, the active controls,
/// and the caller's cursors.
#[derive(Debug, Default, Deserialize)]
struct ViewQuery {
    view: Option<String>,
    path: Option<String>,
    q: Option<String>,
    language: Option<String>,
    difficulty: Option<String>,
    page: Option<usize>,
    repos_limit: Option<usize>,
    issues_limit: Option<usize>,
}

impl ViewQuery {
    fn view_context(&self) -> ViewContext {
        match self.view.as_deref() {
            Some("dashboard") => ViewContext::Dashboard,
            Some("repositories") => ViewContext::Repositories,
            Some("issues") => ViewContext::Issues,
            Some(_) => ViewContext::Other,
            None => self
                .path
                .as_deref()
                .map(ViewContext::from_path)
                .unwrap_or(ViewContext::Other),
        }
    }

    fn filter_state(&self) -> FilterState {
        FilterState {
            search: self.q.clone().unwrap_or_default(),
            language: self.language.clone().unwrap_or_else(|| FACET_ALL.to_string()),
            difficulty: self
                .difficulty
                .clone()
                .unwrap_or_else(|| FACET_ALL.to_string()),
        }
    }
}

fn evaluate_view(catalog: &Catalog, query: &ViewQuery) -> RenderPlan {
    let engine = CatalogEngine::new(
        query.view_context(),
        &catalog.repo_cards,
        &catalog.issue_cards,
    )
    .with_filters(query.filter_state())
    .with_page(query.page.unwrap_or(1))
    .with_reveal_limits(
        query.repos_limit.unwrap_or(DEFAULT_PAGE_SIZE),
        query.issues_limit.unwrap_or(DEFAULT_PAGE_SIZE),
    );
    engine.apply_filters()
}

fn repo_template_value(record: &RepoRecord) -> serde_json::Value {
    let mut value = serde_json::to_value(record).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(obj) = value.as_object_mut() {
        obj.insert("difficulty".into(), record.difficulty().into());
        let age = record
            .last_active
            .as_deref()
            .and_then(|t| relative_age(t, Utc::now()));
        obj.insert(
            "last_active_label".into(),
            age.map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null),
        );
    }
    value
}

fn issue_template_value(record: &IssueRecord) -> serde_json::Value {
    let mut value = serde_json::to_value(record).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(obj) = value.as_object_mut() {
        obj.insert("difficulty".into(), record.difficulty().into());
        obj.insert("tags".into(), serde_json::json!(record.tags()));
        let age = record
            .created_at
            .as_deref()
            .and_then(|t| relative_age(t, Utc::now()));
        obj.insert(
            "created_label".into(),
            age.map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null),
        );
    }
    value
}

fn render_view_page(
    state: &AppState,
    template_name: &str,
    view_name: &str,
    title: &str,
) -> Result<Html<String>, StatusCode> {
    let catalog = &state.catalog;
    let query = ViewQuery {
        view: Some(view_name.to_string()),
        ..Default::default()
    };
    let plan = evaluate_view(catalog, &query);
    let plan_json = serde_json::to_string(&plan).map_err(|e| {
        log::error!("failed to serialize render plan: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let repos: Vec<serde_json::Value> = catalog.repos.iter().map(repo_template_value).collect();
    let issues: Vec<serde_json::Value> = catalog.issues.iter().map(issue_template_value).collect();

    let template = state.templates.get_template(template_name).map_err(|e| {
        log::error!("missing template {}: {}", template_name, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let html = template
        .render(context! {
            title => title,
            view => view_name,
            repos => repos,
            issues => issues,
            languages => catalog.languages,
            page_size => DEFAULT_PAGE_SIZE,
            reveal_hold_ms => REVEAL_HOLD.as_millis() as u64,
            initial_plan_json => plan_json,
        })
        .map_err(|e| {
            log::error!("failed to render {} template: {}", template_name, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Html(html))
}

async fn dashboard_handler(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    log::debug!("Received request for dashboard page");
    render_view_page(&state, "dashboard", "dashboard", "Contribdeck")
}

async fn repositories_handler(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    log::debug!("Received request for repositories page");
    render_view_page(&state, "repositories", "repositories", "Repositories")
}

async fn issues_handler(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    log::debug!("Received request for issues page");
    render_view_page(&state, "issues", "issues", "Open Issues")
}

async fn health_handler() -> Result<Json<serde_json::Value>, StatusCode> {
    log::debug!("Health check requested");
    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Contribdeck WebUI is running"
    })))
}

async fn view_api_handler(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Json<RenderPlan> {
    log::debug!("view evaluation requested: {:?}", query);
    Json(evaluate_view(&state.catalog, &query))
}

async fn repos_api_handler(State(state): State<AppState>) -> Json<Vec<serde_json::Value>> {
    Json(state.catalog.repos.iter().map(repo_template_value).collect())
}

async fn issues_api_handler(State(state): State<AppState>) -> Json<Vec<serde_json::Value>> {
    Json(
        state
            .catalog
            .issues
            .iter()
            .map(issue_template_value)
            .collect(),
    )
}
