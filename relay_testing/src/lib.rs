//! Stand-ins for external services, used by integration tests and for local
//! development.

pub mod email;
