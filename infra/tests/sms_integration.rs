//! Integration tests for OTP delivery over SMS

use chrono::Utc;
use std::sync::Arc;

use pv_core::domain::clock::ManualClock;
use pv_core::errors::SendError;
use pv_core::services::otp::{
    DeliveryFailurePolicy, NotificationSink, OtpService, OtpServiceConfig, OtpStore,
};
use pv_infra::cache::InMemoryOtpStore;
use pv_infra::notification::{FanoutSink, NotificationCenter, SmsNotificationSink};
use pv_infra::sms::MockSmsService;
use pv_shared::config::SmsConfig;

fn sms_service(
    sms: &MockSmsService,
    config: OtpServiceConfig,
) -> (Arc<InMemoryOtpStore>, OtpService<dyn OtpStore, dyn NotificationSink>) {
    let store = Arc::new(InMemoryOtpStore::unbounded());
    let sink: Arc<dyn NotificationSink> =
        Arc::new(SmsNotificationSink::new(Arc::new(sms.clone()), &SmsConfig::default(), 5));
    let service = OtpService::new(
        store.clone() as Arc<dyn OtpStore>,
        sink,
        Arc::new(ManualClock::new(Utc::now())),
        config,
    );
    (store, service)
}

/// Pull the six digits out of "... code is: 123456. Valid for ..."
fn code_from_body(body: &str) -> String {
    body.split("code is: ")
        .nth(1)
        .map(|rest| rest.chars().take(6).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_code_delivered_by_sms_verifies() {
    let sms = MockSmsService::with_options(false, false);
    let (_, service) = sms_service(&sms, OtpServiceConfig::default());

    service.send_otp("9999999999").await.unwrap();

    let sent = sms.last_message_to("+919999999999").unwrap();
    assert!(sent.body.starts_with("Your RelishApprovals verification code is: "));
    assert!(sent.body.ends_with("Valid for 5 minutes."));

    let code = code_from_body(&sent.body);
    assert!(service.verify_otp("9999999999", &code).await);
}

#[tokio::test]
async fn test_sms_failure_keeps_entry_by_default() {
    let sms = MockSmsService::with_options(false, true);
    let (store, service) = sms_service(&sms, OtpServiceConfig::default());

    match service.send_otp("+919999999999").await {
        Err(SendError::Delivery { entry_retained, .. }) => assert!(entry_retained),
        other => panic!("Expected delivery error, got {:?}", other),
    }
    assert_eq!(store.len().unwrap(), 1);
}

#[tokio::test]
async fn test_sms_failure_rolls_back_when_configured() {
    let sms = MockSmsService::with_options(false, true);
    let config = OtpServiceConfig {
        delivery_failure_policy: DeliveryFailurePolicy::Rollback,
        ..Default::default()
    };
    let (store, service) = sms_service(&sms, config);

    match service.send_otp("+919999999999").await {
        Err(SendError::Delivery { entry_retained, .. }) => assert!(!entry_retained),
        other => panic!("Expected delivery error, got {:?}", other),
    }
    assert!(store.is_empty().unwrap());
}

#[tokio::test]
async fn test_in_app_and_sms_receive_same_code() {
    let sms = MockSmsService::with_options(false, false);
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let center = Arc::new(NotificationCenter::with_defaults(clock.clone()));
    let sinks: Vec<Arc<dyn NotificationSink>> = vec![
        center.clone(),
        Arc::new(SmsNotificationSink::new(Arc::new(sms.clone()), &SmsConfig::default(), 5)),
    ];
    let service = OtpService::new(
        Arc::new(InMemoryOtpStore::unbounded()),
        Arc::new(FanoutSink::new(sinks)),
        clock,
        OtpServiceConfig::default(),
    );

    service.send_otp("+919999999999").await.unwrap();

    let in_app = center.active_for("+919999999999")[0].code.clone().unwrap();
    let texted = code_from_body(&sms.last_message_to("+919999999999").unwrap().body);
    assert_eq!(in_app, texted);
    assert!(service.verify_otp("+919999999999", &in_app).await);
}
