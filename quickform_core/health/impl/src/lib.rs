use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use quickform_core_health_contracts::{HealthFeatureService, HealthStatus};
use quickform_email_contracts::EmailDispatchService;
use quickform_persistence_contracts::SubmissionRepository;
use quickform_shared_contracts::time::TimeService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Time, SubmissionRepo, EmailDispatch> {
    time: Time,
    submission_repo: SubmissionRepo,
    email_dispatch: EmailDispatch,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl<Time, SubmissionRepo, EmailDispatch>
    HealthFeatureServiceImpl<Time, SubmissionRepo, EmailDispatch>
{
    pub fn new(
        time: Time,
        submission_repo: SubmissionRepo,
        email_dispatch: EmailDispatch,
        config: HealthFeatureConfig,
    ) -> Self {
        Self {
            time,
            submission_repo,
            email_dispatch,
            config,
            state: Default::default(),
        }
    }

    fn fresh<'a>(
        &self,
        cached: &'a Option<CachedStatus>,
        now: DateTime<Utc>,
    ) -> Option<&'a CachedStatus> {
        cached
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
    }
}

impl<Time, SubmissionRepo, EmailDispatch> HealthFeatureService
    for HealthFeatureServiceImpl<Time, SubmissionRepo, EmailDispatch>
where
    Time: TimeService,
    SubmissionRepo: SubmissionRepository,
    EmailDispatch: EmailDispatchService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = self.fresh(&cache_guard, now) {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = self.fresh(&cache_guard, now) {
            return cached.status;
        }

        let persistence = self
            .submission_repo
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping table service: {err:#}"))
            .is_ok();

        let status = HealthStatus {
            persistence,
            email: self.email_dispatch.is_enabled(),
        };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}
