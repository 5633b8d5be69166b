use std::sync::Arc;

use anyhow::{anyhow, Context};
use quickform_extern_contracts::emailjs::{EmailJsApiService, EmailJsTemplateParams};
use quickform_models::emailjs::EmailJsCredentials;
use serde::Serialize;
use tracing::trace;
use url::Url;

use crate::http::HttpClient;

const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceImpl {
    config: EmailJsApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsApiServiceConfig {
    send_endpoint: Arc<Url>,
}

impl EmailJsApiServiceConfig {
    pub fn new(endpoint_override: Option<Url>) -> anyhow::Result<Self> {
        let send_endpoint = match endpoint_override {
            Some(url) => url,
            None => SEND_ENDPOINT
                .parse()
                .context("Failed to parse EmailJS endpoint")?,
        };

        Ok(Self {
            send_endpoint: send_endpoint.into(),
        })
    }
}

impl EmailJsApiServiceImpl {
    pub fn new(config: EmailJsApiServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl EmailJsApiService for EmailJsApiServiceImpl {
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(template_id = credentials.template_id.as_str())
    )]
    async fn send(
        &self,
        credentials: &EmailJsCredentials,
        params: &EmailJsTemplateParams,
    ) -> anyhow::Result<()> {
        let request = SendRequest {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.public_key,
            template_params: params.into(),
        };

        let response = self
            .client
            .post((*self.config.send_endpoint).clone())
            .json(&request)
            .send()
            .await
            .context("Failed to reach EmailJS")?;

        let status = response.status();
        if status.is_success() {
            trace!(%status, "email accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(anyhow!("EmailJS rejected the email ({status}): {body}"))
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    telephone: &'a str,
    formation: &'a str,
    message: &'a str,
    title: &'a str,
    reply_to: &'a str,
    sent_date: i32,
}

impl<'a> From<&'a EmailJsTemplateParams> for TemplateParams<'a> {
    fn from(value: &'a EmailJsTemplateParams) -> Self {
        Self {
            name: &value.name,
            email: &value.email,
            telephone: &value.telephone,
            formation: &value.formation,
            message: &value.message,
            title: &value.title,
            reply_to: &value.reply_to,
            sent_date: value.sent_date,
        }
    }
}
