//! Unit tests for SMS service creation

use pv_shared::config::SmsConfig;

use crate::sms::create_sms_service;

#[test]
fn test_create_mock_service() {
    let config = SmsConfig::default();
    let service = create_sms_service(&config);
    assert_eq!(service.provider_name(), "Mock");
}

#[test]
fn test_create_unknown_provider_fallback() {
    let config = SmsConfig {
        provider: "carrier-pigeon".to_string(),
        ..Default::default()
    };

    let service = create_sms_service(&config);
    assert_eq!(service.provider_name(), "Mock");
}

#[cfg(feature = "twilio-sms")]
#[test]
fn test_create_twilio_service() {
    let config = SmsConfig {
        provider: "twilio".to_string(),
        account_sid: "ACtest".to_string(),
        auth_token: "test_token".to_string(),
        from_number: "+15551234567".to_string(),
        ..Default::default()
    };

    let service = create_sms_service(&config);
    assert_eq!(service.provider_name(), "Twilio");
}

#[cfg(feature = "twilio-sms")]
#[test]
fn test_create_twilio_without_credentials_falls_back() {
    let config = SmsConfig {
        provider: "twilio".to_string(),
        ..Default::default()
    };

    let service = create_sms_service(&config);
    assert_eq!(service.provider_name(), "Mock");
}
