use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Prefilled links for every way a customer can reach the shop
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactChannelsDto {
    /// Chat deep link with the message prefilled
    pub whatsapp_url: String,
    pub email: String,
    /// `mailto:` link with subject and body prefilled
    pub email_url: String,
    pub phone: String,
    pub phone_url: String,
    /// Message the links were prefilled with
    pub message: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ContactQuery {
    /// Custom message; defaults to a general enquiry
    pub message: Option<String>,
}
