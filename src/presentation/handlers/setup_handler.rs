// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use migration::{Migrator, MigratorTrait, SchemaManager};
use sea_orm::{DatabaseConnection, DbErr};
use serde::Deserialize;
use std::fmt::Write;
use tracing::{error, info, warn};

use crate::infrastructure::database::connection;
use crate::presentation::state::AppState;
use crate::presentation::views::text;

/// 应用使用的数据表
const TABLES: [&str; 4] = ["users", "participants", "points_history", "refresh_log"];

#[derive(Debug, Default, Deserialize)]
pub struct SetupQuery {
    recreate: Option<String>,
}

impl SetupQuery {
    fn recreate(&self) -> bool {
        self.recreate
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// 数据库初始化
///
/// 由 `admin.setup_key` 保护；`?recreate=true` 时删除所有表后重新迁移
pub async fn setup_database(
    Extension(state): Extension<AppState>,
    Path(key): Path<String>,
    Query(query): Query<SetupQuery>,
) -> Response {
    if key != state.settings.admin.setup_key {
        warn!("database setup attempted with a wrong key");
        return (StatusCode::FORBIDDEN, "Access denied").into_response();
    }

    match run_setup(&state, query.recreate()).await {
        Ok(report) => Html(format!("<h1>Database Setup</h1>{}", report)).into_response(),
        Err(e) => {
            error!("database setup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!(
                    "<h1>Error</h1>Error creating database tables: {}",
                    text(&e.to_string())
                )),
            )
                .into_response()
        }
    }
}

async fn run_setup(state: &AppState, recreate: bool) -> Result<String, DbErr> {
    let db = state.db.as_ref();
    let mut report = String::new();

    let _ = write!(
        report,
        "Connected to: {}<br>",
        connection::backend_name(&state.settings.database.url)
    );

    let existing = existing_tables(db).await?;
    let _ = write!(report, "Existing tables: {}<br>", table_list(&existing));

    if recreate && !existing.is_empty() {
        report.push_str("Dropping existing tables...<br>");
        info!("recreating database schema");
        Migrator::fresh(db).await?;
    } else {
        report.push_str("Creating tables...<br>");
        Migrator::up(db, None).await?;
    }

    let after = existing_tables(db).await?;
    let _ = write!(report, "Tables after setup: {}<br>", table_list(&after));

    report.push_str("<br>Testing models:<br>");
    match state.users.count().await {
        Ok(count) => {
            let _ = write!(report, "- User model OK. Count: {}<br>", count);
        }
        Err(e) => {
            let _ = write!(report, "- User model ERROR: {}<br>", text(&e.to_string()));
        }
    }
    Ok(report)
}

async fn existing_tables(db: &DatabaseConnection) -> Result<Vec<&'static str>, DbErr> {
    let manager = SchemaManager::new(db);
    let mut found = Vec::new();
    for table in TABLES {
        if manager.has_table(table).await? {
            found.push(table);
        }
    }
    Ok(found)
}

fn table_list(tables: &[&str]) -> String {
    if tables.is_empty() {
        "None".to_string()
    } else {
        tables.join(", ")
    }
}
