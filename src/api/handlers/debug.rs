//! Handler for the debug introspection endpoint.

use axum::{Json, extract::State};
use std::env;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::api::dto::debug::{DebugResponse, EnvPresence, MemoryUsage};
use crate::state::AppState;

/// Reports environment presence flags, database status and process memory.
///
/// # Endpoint
///
/// `GET /debug`
///
/// Always answers 200; a failing database shows up in `dbStatus`.
///
/// # Response
///
/// ```json
/// {
///   "env": {
///     "POSTGRES_URL": "Undefined",
///     "DATABASE_URL": "Defined",
///     "PORT": "3000"
///   },
///   "backend": "postgres",
///   "dbStatus": "Connected",
///   "memory": { "rss": 18350080, "virtual": 1073741824 }
/// }
/// ```
pub async fn debug_handler(State(state): State<AppState>) -> Json<DebugResponse> {
    let db_status = match state.store.ping().await {
        Ok(()) => "Connected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Debug database check failed");
            format!("Error: {e}")
        }
    };

    Json(DebugResponse {
        env: EnvPresence {
            postgres_url: presence("POSTGRES_URL"),
            database_url: presence("DATABASE_URL"),
            port: env::var("PORT").ok(),
        },
        backend: state.store.backend().as_str(),
        db_status,
        memory: process_memory(),
    })
}

fn presence(name: &str) -> &'static str {
    match env::var(name) {
        Ok(value) if !value.is_empty() => "Defined",
        _ => "Undefined",
    }
}

/// Memory of the current process, zeroes if it cannot be read.
fn process_memory() -> MemoryUsage {
    let pid = Pid::from_u32(std::process::id());

    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    sys.process(pid)
        .map(|process| MemoryUsage {
            rss: process.memory(),
            r#virtual: process.virtual_memory(),
        })
        .unwrap_or_default()
}
