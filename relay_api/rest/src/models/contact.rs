use relay_models::contact::RawContactSubmission;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiContactSubmission {
    /// Full name of the sender
    pub name: String,
    /// Email address of the sender
    pub email: String,
    /// Optional phone number of the sender
    pub phone: String,
    /// Content of the message
    pub message: String,
}

impl From<ApiContactSubmission> for RawContactSubmission {
    fn from(value: ApiContactSubmission) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            message: value.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiContactResponse {
    pub success: bool,
    pub message: &'static str,
}

impl ApiContactResponse {
    pub const SUCCESS: Self = Self {
        success: true,
        message: "Email sent successfully",
    };

    pub const FAILURE: Self = Self {
        success: false,
        message: "Failed to send email",
    };
}
