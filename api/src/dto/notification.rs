use serde::Deserialize;
use validator::Validate;

/// Filter for `GET /api/v1/notifications`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NotificationQuery {
    /// Only notifications raised for this phone number are listed
    #[validate(length(min = 7, max = 20))]
    pub phone: String,
}
