//! Unit tests for mock SMS service

use crate::sms::{MockSmsService, SmsService};
use crate::InfrastructureError;

#[tokio::test]
async fn test_mock_sms_send_success() {
    let service = MockSmsService::with_options(false, false);
    let message_id = service
        .send_sms("+919999999999", "Test message")
        .await
        .unwrap();

    assert!(message_id.starts_with("mock_"));
    assert_eq!(service.get_message_count(), 1);

    let sent = service.last_message_to("+919999999999").unwrap();
    assert_eq!(sent.message_id, message_id);
    assert_eq!(sent.body, "Test message");
}

#[tokio::test]
async fn test_mock_sms_invalid_phone() {
    let service = MockSmsService::with_options(false, false);
    let result = service.send_sms("9999999999", "Test message").await;

    match result {
        Err(InfrastructureError::Sms(msg)) => {
            assert!(msg.contains("Invalid phone number"));
            // Full number never appears in the error
            assert!(!msg.contains("9999999999"));
        }
        other => panic!("Expected Sms error, got {:?}", other),
    }
    assert!(service.sent_messages().is_empty());
}

#[tokio::test]
async fn test_mock_sms_simulate_failure() {
    let service = MockSmsService::with_options(false, false);
    service.set_simulate_failure(true);

    assert!(service.send_sms("+919999999999", "Test message").await.is_err());
    assert!(!service.is_available().await);
    assert_eq!(service.get_message_count(), 0);

    service.set_simulate_failure(false);
    assert!(service.send_sms("+919999999999", "Test message").await.is_ok());
    assert!(service.is_available().await);
}

#[tokio::test]
async fn test_mock_sms_clones_share_outbox() {
    let service = MockSmsService::with_options(false, false);
    let clone = service.clone();

    for i in 1..=3 {
        clone
            .send_sms("+919999999999", &format!("Message {}", i))
            .await
            .unwrap();
    }

    assert_eq!(service.get_message_count(), 3);
    assert_eq!(service.sent_messages().len(), 3);
    assert_eq!(
        service.last_message_to("+919999999999").unwrap().body,
        "Message 3"
    );
    assert!(service.last_message_to("+918888888888").is_none());
}

#[test]
fn test_provider_name() {
    assert_eq!(MockSmsService::new().provider_name(), "Mock");
}
