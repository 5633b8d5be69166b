use quickform_config::Config;
use quickform_core_health_impl::HealthFeatureConfig;
use quickform_email_impl::EmailDispatchConfig;
use quickform_extern_impl::{emailjs::EmailJsApiServiceConfig, http::HttpClient};
use quickform_persistence_postgrest::PostgrestConfig;
use tracing::warn;
use types::{
    EmailDispatch, EmailJsApi, FormFeature, HealthFeature, RestServer, SubmissionRepo, Time,
};

pub mod types;

/// Builds the services of the application from the configuration.
///
/// Every service handed out shares the same http client, and all form
/// services share one draft.
#[derive(Debug, Clone)]
pub struct Provider {
    time: Time,
    submission_repo: SubmissionRepo,
    email_dispatch: EmailDispatch,
    health_feature_config: HealthFeatureConfig,
    form_feature: FormFeature,
}

impl Provider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = HttpClient::new()?;
        let time = Time::default();

        // Persistence
        let persistence = &config.persistence;
        let postgrest_config = PostgrestConfig::new(
            &persistence.url,
            &persistence.api_key,
            &persistence.table,
            persistence.schema.as_deref(),
        )?;
        let submission_repo = SubmissionRepo::new(postgrest_config, client.clone());

        // Extern
        let emailjs_api_config =
            EmailJsApiServiceConfig::new(config.emailjs.endpoint_override.clone())?;
        let emailjs_api = EmailJsApi::new(emailjs_api_config, client);

        // Email
        let credentials = config.emailjs.credentials();
        if credentials.is_none() {
            warn!("EmailJS is not fully configured, registrations will not be emailed");
        }
        let email_dispatch = EmailDispatch::new(
            time,
            emailjs_api,
            EmailDispatchConfig {
                credentials: credentials.map(Into::into),
            },
        );

        // Core
        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        };
        let form_feature =
            FormFeature::new(time, submission_repo.clone(), email_dispatch.clone());

        Ok(Self {
            time,
            submission_repo,
            email_dispatch,
            health_feature_config,
            form_feature,
        })
    }

    pub fn submission_repo(&self) -> SubmissionRepo {
        self.submission_repo.clone()
    }

    pub fn email_dispatch(&self) -> EmailDispatch {
        self.email_dispatch.clone()
    }

    pub fn form_feature(&self) -> FormFeature {
        self.form_feature.clone()
    }

    pub fn health_feature(&self) -> HealthFeature {
        HealthFeature::new(
            self.time,
            self.submission_repo(),
            self.email_dispatch(),
            self.health_feature_config.clone(),
        )
    }

    pub fn rest_server(&self) -> RestServer {
        RestServer::new(self.health_feature(), self.form_feature())
    }
}
