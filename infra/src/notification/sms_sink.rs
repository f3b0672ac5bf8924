//! Notification sink that texts codes to the identifier's phone

use async_trait::async_trait;
use std::sync::Arc;

use pv_core::services::otp::{NotificationSink, OtpNotification};
use pv_shared::config::SmsConfig;
use pv_shared::phone::{format_phone_number, mask_phone_number};

use crate::sms::{format_otp_message, SmsService};

/// Delivers OTP notifications over SMS
pub struct SmsNotificationSink {
    sms: Arc<dyn SmsService>,
    app_name: String,
    default_country_code: String,
    ttl_minutes: u64,
}

impl SmsNotificationSink {
    /// # Arguments
    ///
    /// * `sms` - Provider used to send the message
    /// * `config` - Supplies the app name and default country code
    /// * `ttl_minutes` - Validity quoted in the message text
    pub fn new(sms: Arc<dyn SmsService>, config: &SmsConfig, ttl_minutes: u64) -> Self {
        Self {
            sms,
            app_name: config.app_name.clone(),
            default_country_code: config.default_country_code.clone(),
            ttl_minutes,
        }
    }
}

#[async_trait]
impl NotificationSink for SmsNotificationSink {
    async fn dispatch(&self, identifier: &str, notification: &OtpNotification) -> Result<(), String> {
        let phone = format_phone_number(identifier, &self.default_country_code);
        if phone.is_empty() {
            return Err(format!(
                "Identifier {} is not a phone number",
                mask_phone_number(identifier)
            ));
        }

        let body = format_otp_message(&self.app_name, &notification.code, self.ttl_minutes);
        let message_id = self
            .sms
            .send_sms(&phone, &body)
            .await
            .map_err(|e| e.to_string())?;

        tracing::info!(
            phone = %mask_phone_number(&phone),
            provider = self.sms.provider_name(),
            message_id = %message_id,
            "OTP delivered by SMS"
        );
        Ok(())
    }
}
