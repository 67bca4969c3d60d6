use relay_core_contact_impl::ContactFeatureServiceImpl;
use relay_email_impl::EmailServiceImpl;
use relay_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = relay_api_rest::RestServer<ContactFeature>;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Time, Email>;

// Email
pub type Email = EmailServiceImpl;

// Shared
pub type Time = TimeServiceImpl;
