use quickform_core_form_impl::FormFeatureServiceImpl;
use quickform_core_health_impl::HealthFeatureServiceImpl;
use quickform_email_impl::EmailDispatchServiceImpl;
use quickform_extern_impl::emailjs::EmailJsApiServiceImpl;
use quickform_persistence_postgrest::PostgrestSubmissionRepository;
use quickform_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = quickform_api_rest::RestServer<HealthFeature, FormFeature>;

// Extern
pub type EmailJsApi = EmailJsApiServiceImpl;

// Persistence
pub type SubmissionRepo = PostgrestSubmissionRepository;

// Shared
pub type Time = TimeServiceImpl;

// Email
pub type EmailDispatch = EmailDispatchServiceImpl<Time, EmailJsApi>;

// Core
pub type FormFeature = FormFeatureServiceImpl<Time, SubmissionRepo, EmailDispatch>;
pub type HealthFeature = HealthFeatureServiceImpl<Time, SubmissionRepo, EmailDispatch>;
