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

use log::{debug, info};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;
use surrealdb::engine::local::Mem;
use surrealdb::engine::remote::http::{Http, Https};
use surrealdb::Surreal;
use tokio::runtime::Runtime;

// Process-wide embedded Mem instance. Multiple callers (the web UI and
// integration tests) must observe the same in-memory database, so creation is
// serialized behind MEM_CREATE_LOCK and the instance is cached here for the
// lifetime of the process.
static SHARED_MEM: OnceLock<Arc<Surreal<surrealdb::engine::local::Db>>> = OnceLock::new();
static MEM_CREATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// A connection to the catalog backend: either the embedded in-memory engine
/// or a remote SurrealDB instance reached over HTTP.
pub enum SurrealConnection {
    Local(Arc<Surreal<surrealdb::engine::local::Db>>),
    RemoteHttp(Surreal<surrealdb::engine::remote::http::Client>),
}

impl SurrealConnection {
    pub async fn use_ns(&self, namespace: &str) -> Result<(), surrealdb::Error> {
        match self {
            Self::Local(db) => db.use_ns(namespace).await,
            Self::RemoteHttp(db) => db.use_ns(namespace).await,
        }
    }

    pub async fn use_db(&self, database: &str) -> Result<(), surrealdb::Error> {
        match self {
            Self::Local(db) => db.use_db(database).await,
            Self::RemoteHttp(db) => db.use_db(database).await,
        }
    }

    /// Run a query and log its SQL and duration at debug level.
    pub async fn query(&self, sql: &str) -> Result<surrealdb::Response, surrealdb::Error> {
        let start = Instant::now();
        let res = match self {
            Self::Local(db) => db.query(sql).await,
            Self::RemoteHttp(db) => db.query(sql).await,
        };
        match &res {
            Ok(_) => debug!("query ok in {:?}: {}", start.elapsed(), sql),
            Err(e) => debug!("query failed in {:?}: {} -> {}", start.elapsed(), sql, e),
        }
        res
    }

    pub async fn query_with_binds(
        &self,
        sql: &str,
        binds: Vec<(&'static str, serde_json::Value)>,
    ) -> Result<surrealdb::Response, surrealdb::Error> {
        match self {
            Self::Local(db) => {
                let mut call = db.query(sql);
                for (k, v) in binds.into_iter() {
                    call = call.bind((k, v));
                }
                call.await
            }
            Self::RemoteHttp(db) => {
                let mut call = db.query(sql);
                for (k, v) in binds.into_iter() {
                    call = call.bind((k, v));
                }
                call.await
            }
        }
    }
}

/// Establish a connection to the catalog backend.
///
/// Precedence for connection parameters:
/// 1. Explicit values passed by the caller (`Some(..)`)
/// 2. Environment variables: `SURREALDB_URL`, `SURREALDB_USERNAME`,
///    `SURREALDB_PASSWORD`
/// 3. The embedded in-memory engine (Mem)
///
/// Tests can force ignoring the env fallback with
/// `CONTRIBDECK_DISABLE_SURREAL_ENV=1`, and request a fresh per-test Mem
/// instance with `CONTRIBDECK_EPHEMERAL_MEM=1`.
pub async fn connect(
    url: &Option<String>,
    user: &Option<String>,
    pass: &Option<String>,
    ns: &str,
    db: &str,
) -> anyhow::Result<SurrealConnection> {
    let allow_env = std::env::var("CONTRIBDECK_DISABLE_SURREAL_ENV").ok().as_deref() != Some("1");
    let resolved_url = if url.is_some() {
        url.clone()
    } else if allow_env {
        std::env::var("SURREALDB_URL").ok()
    } else {
        None
    };
    let resolved_user = if user.is_some() {
        user.clone()
    } else if allow_env {
        std::env::var("SURREALDB_USERNAME").ok()
    } else {
        None
    };
    let resolved_pass = if pass.is_some() {
        pass.clone()
    } else if allow_env {
        std::env::var("SURREALDB_PASSWORD").ok()
    } else {
        None
    };

    let conn = if let Some(url) = resolved_url {
        let target = normalize_client_target(&url);
        debug!("connecting to remote SurrealDB at {}", target);
        let connection = if url.starts_with("https://") || url.starts_with("wss://") {
            Surreal::new::<Https>(target.as_str()).await?
        } else {
            Surreal::new::<Http>(target.as_str()).await?
        };
        if let (Some(u), Some(p)) = (resolved_user.as_ref(), resolved_pass.as_ref()) {
            connection
                .signin(surrealdb::opt::auth::Root {
                    username: u.as_str(),
                    password: p.as_str(),
                })
                .await?;
        }
        SurrealConnection::RemoteHttp(connection)
    } else {
        info!("no SURREALDB_URL provided, using embedded Mem ns={} db={}", ns, db);
        if std::env::var("CONTRIBDECK_EPHEMERAL_MEM").ok().as_deref() == Some("1") {
            let arc = Arc::new(Surreal::new::<Mem>(()).await?);
            SurrealConnection::Local(arc)
        } else {
            SurrealConnection::Local(shared_mem_instance().await?)
        }
    };

    conn.use_ns(ns).await?;
    conn.use_db(db).await?;
    Ok(conn)
}

/// The Surreal HTTP client expects a scheme-less `host:port` target and
/// appends the RPC path itself; strip whatever callers hand us down to that.
fn normalize_client_target(url: &str) -> String {
    let mut target = url.trim().to_string();
    for scheme in ["http://", "https://", "ws://", "wss://"] {
        if let Some(rest) = target.strip_prefix(scheme) {
            target = rest.to_string();
            break;
        }
    }
    target = target.trim_end_matches('/').to_string();
    if let Some(stripped) = target.strip_suffix("/rpc") {
        target = stripped.to_string();
    }
    target
}

/// Return the process-wide embedded Mem instance, creating it on first use.
///
/// The instance is created on a dedicated thread that owns its own Tokio
/// runtime and then parks forever, so the engine's background tasks survive
/// callers (notably per-test runtimes) dropping their own runtimes.
async fn shared_mem_instance() -> anyhow::Result<Arc<Surreal<surrealdb::engine::local::Db>>> {
    if let Some(existing) = SHARED_MEM.get() {
        return Ok(existing.clone());
    }

    let arc = tokio::task::spawn_blocking(|| {
        let create_lock = MEM_CREATE_LOCK.get_or_init(|| Mutex::new(()));
        let _guard = create_lock.lock().unwrap();
        if let Some(existing) = SHARED_MEM.get() {
            return Ok(existing.clone());
        }

        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || match Runtime::new() {
            Ok(rt) => {
                let res = rt.block_on(async { Surreal::new::<Mem>(()).await });
                match res {
                    Ok(s) => {
                        let _ = tx.send(Ok(Arc::new(s)));
                        rt.block_on(async { std::future::pending::<()>().await });
                    }
                    Err(e) => {
                        let _ = tx.send(Err(anyhow::anyhow!(e)));
                    }
                }
            }
            Err(e) => {
                let _ = tx.send(Err(anyhow::anyhow!(e)));
            }
        });

        match rx.recv() {
            Ok(Ok(arc)) => {
                let _ = SHARED_MEM.set(arc.clone());
                Ok(arc)
            }
            Ok(Err(e)) => Err(e),
            Err(e) => Err(anyhow::anyhow!(e)),
        }
    })
    .await
    .map_err(|e| anyhow::anyhow!(e))??;

    Ok(arc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_target_strips_scheme_and_rpc() {
        assert_eq!(normalize_client_target("http://localhost:8000"), "localhost:8000");
        assert_eq!(normalize_client_target("https://db.example.com/rpc"), "db.example.com");
        assert_eq!(normalize_client_target("ws://10.0.0.5:8000/"), "10.0.0.5:8000");
        assert_eq!(normalize_client_target("surreal.internal:8000"), "surreal.internal:8000");
    }
}
