use std::sync::Arc;

use anyhow::{anyhow, Context};
use chrono::SecondsFormat;
use quickform_extern_impl::http::HttpClient;
use quickform_models::submission::SubmissionRecord;
use quickform_persistence_contracts::{SubmissionRepoError, SubmissionRepository};
use quickform_utils::Apply;
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

/// Submission repository backed by a Supabase table, accessed through its
/// PostgREST interface.
#[derive(Debug, Clone)]
pub struct PostgrestSubmissionRepository {
    config: PostgrestConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    table_url: Arc<Url>,
    api_key: Arc<str>,
    schema: Option<Arc<str>>,
}

impl PostgrestConfig {
    /// `project_url` is the base url of the Supabase project; requests go to
    /// `{project_url}/rest/v1/{table}`.
    pub fn new(
        project_url: &Url,
        api_key: &str,
        table: &str,
        schema: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut table_url = project_url.clone();
        table_url
            .path_segments_mut()
            .map_err(|()| anyhow!("{project_url} cannot be used as a base url"))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);

        Ok(Self {
            table_url: table_url.into(),
            api_key: api_key.into(),
            schema: schema.map(Into::into),
        })
    }
}

impl PostgrestSubmissionRepository {
    pub fn new(config: PostgrestConfig, client: HttpClient) -> Self {
        Self { config, client }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &*self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }
}

impl SubmissionRepository for PostgrestSubmissionRepository {
    #[tracing::instrument(level = "trace", skip_all)]
    async fn insert(&self, record: &SubmissionRecord) -> Result<(), SubmissionRepoError> {
        let response = self
            .authorized(self.client.post((*self.config.table_url).clone()))
            .apply_map(self.config.schema.as_deref(), |request, schema| {
                request.header("Content-Profile", schema)
            })
            .header("Prefer", "return=minimal")
            .json(&[InsertRow::from(record)])
            .send()
            .await
            .context("Failed to reach the table service")?;

        let status = response.status();
        if status.is_success() {
            trace!(%status, "submission inserted");
            return Ok(());
        }

        Err(decode_error(response).await)
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn ping(&self) -> anyhow::Result<()> {
        let response = self
            .authorized(self.client.get((*self.config.table_url).clone()))
            .query(&[("select", "*"), ("limit", "0")])
            .apply_map(self.config.schema.as_deref(), |request, schema| {
                request.header("Accept-Profile", schema)
            })
            .send()
            .await
            .context("Failed to reach the table service")?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!(decode_error(response).await)
                .context(format!("Table service responded with {status}")));
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct InsertRow<'a> {
    nom: &'a str,
    email: &'a str,
    telephone: &'a str,
    formation: &'a str,
    message: &'a str,
    created_at: String,
}

impl<'a> From<&'a SubmissionRecord> for InsertRow<'a> {
    fn from(value: &'a SubmissionRecord) -> Self {
        let submission = &value.submission;
        Self {
            nom: &submission.name,
            email: &submission.email,
            telephone: &submission.phone,
            formation: submission.course.as_str(),
            message: &submission.message,
            created_at: value
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: String,
    details: Option<String>,
    hint: Option<String>,
}

async fn decode_error(response: Response) -> SubmissionRepoError {
    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(err) => {
            return anyhow!(err)
                .context(format!("Failed to read error response ({status})"))
                .into()
        }
    };

    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => SubmissionRepoError::Rejected {
            code: body.code,
            message: body.message,
            details: body.details,
            hint: body.hint,
        },
        Err(_) => anyhow!("Table service responded with {status}: {text}").into(),
    }
}
