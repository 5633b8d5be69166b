use std::{
    collections::HashMap,
    net::IpAddr,
    sync::{Arc, Mutex, PoisonError},
};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

pub const TABLE_ROUTE: &str = "/rest/v1/:table";

const COLUMNS: &[&str] = &["nom", "email", "telephone", "formation", "message", "created_at"];

/// In-memory stand-in for a Supabase (PostgREST) table with the columns of
/// the `inscriptions` table and a unique constraint on `email`.
#[derive(Debug, Clone)]
pub struct PostgrestFake(Arc<Inner>);

#[derive(Debug)]
struct Inner {
    api_key: String,
    table: String,
    rows: Mutex<Vec<Map<String, Value>>>,
}

impl PostgrestFake {
    pub fn new(api_key: impl Into<String>, table: impl Into<String>) -> Self {
        Self(Arc::new(Inner {
            api_key: api_key.into(),
            table: table.into(),
            rows: Default::default(),
        }))
    }

    /// Every row inserted so far, in insertion order.
    pub fn rows(&self) -> Vec<Map<String, Value>> {
        self.0
            .rows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(TABLE_ROUTE, routing::get(select).post(insert))
            .with_state(self.clone())
    }
}

pub async fn start_server(
    host: IpAddr,
    port: u16,
    api_key: String,
    table: String,
) -> anyhow::Result<()> {
    info!("Starting PostgREST testing server on {host}:{port}");
    info!("Project url: http://{host}:{port}");
    info!("API key: {api_key:?}, table: {table:?}");

    let fake = PostgrestFake::new(api_key, table);
    super::serve(fake.router(), host, port).await
}

#[derive(Serialize)]
struct PostgrestError {
    code: Option<String>,
    message: String,
    details: Option<String>,
    hint: Option<String>,
}

fn reject(
    status: StatusCode,
    code: Option<&str>,
    message: String,
    details: Option<String>,
) -> Response {
    let body = PostgrestError {
        code: code.map(Into::into),
        message,
        details,
        hint: None,
    };
    (status, Json(body)).into_response()
}

impl Inner {
    fn check(&self, headers: &HeaderMap, table: &str) -> Result<(), Response> {
        let api_key = headers.get("apikey").and_then(|x| x.to_str().ok());
        let bearer = headers
            .get("authorization")
            .and_then(|x| x.to_str().ok())
            .and_then(|x| x.strip_prefix("Bearer "));
        if api_key != Some(self.api_key.as_str()) || bearer != Some(self.api_key.as_str()) {
            return Err(reject(
                StatusCode::UNAUTHORIZED,
                None,
                "Invalid API key".into(),
                None,
            ));
        }

        if table != self.table {
            return Err(reject(
                StatusCode::NOT_FOUND,
                Some("42P01"),
                format!("relation \"public.{table}\" does not exist"),
                None,
            ));
        }

        Ok(())
    }
}

async fn select(
    State(fake): State<PostgrestFake>,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if let Err(response) = fake.0.check(&headers, &table) {
        return response;
    }

    let limit = query
        .get("limit")
        .and_then(|x| x.parse().ok())
        .unwrap_or(usize::MAX);
    let rows = fake
        .0
        .rows
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .take(limit)
        .cloned()
        .collect::<Vec<_>>();

    Json(rows).into_response()
}

async fn insert(
    State(fake): State<PostgrestFake>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(new_rows): Json<Vec<Map<String, Value>>>,
) -> Response {
    if let Err(response) = fake.0.check(&headers, &table) {
        return response;
    }

    if let Some(column) = new_rows
        .iter()
        .flat_map(|row| row.keys())
        .find(|column| !COLUMNS.contains(&column.as_str()))
    {
        return reject(
            StatusCode::BAD_REQUEST,
            Some("PGRST204"),
            format!("Could not find the '{column}' column of '{table}' in the schema cache"),
            None,
        );
    }

    let mut rows = fake.0.rows.lock().unwrap_or_else(PoisonError::into_inner);
    for row in &new_rows {
        let email = row.get("email");
        if email.is_some() && rows.iter().any(|existing| existing.get("email") == email) {
            let email = email.and_then(Value::as_str).unwrap_or_default();
            return reject(
                StatusCode::CONFLICT,
                Some("23505"),
                format!("duplicate key value violates unique constraint \"{table}_email_key\""),
                Some(format!("Key (email)=({email}) already exists.")),
            );
        }
    }

    info!(count = new_rows.len(), "rows inserted");
    rows.extend(new_rows);

    StatusCode::CREATED.into_response()
}
