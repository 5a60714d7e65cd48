use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_core_health_impl::HealthFeatureServiceImpl;
use folio_core_resume_impl::ResumeFeatureServiceImpl;
use folio_email_impl::EmailServiceImpl;

// API
pub type RestServer = folio_api_rest::RestServer<HealthFeature, ContactFeature, ResumeFeature>;

// Email
pub type Email = EmailServiceImpl;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Email>;
pub type HealthFeature = HealthFeatureServiceImpl<Email, ResumeFeature>;
pub type ResumeFeature = ResumeFeatureServiceImpl;
