//! Unit tests for the in-app notification center

use chrono::{Duration, Utc};
use std::sync::Arc;

use pv_core::domain::clock::{Clock, ManualClock};
use pv_core::services::otp::{NotificationKind, NotificationSink, OtpNotification};

use crate::notification::NotificationCenter;

fn center() -> (Arc<ManualClock>, NotificationCenter) {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let center = NotificationCenter::with_defaults(clock.clone());
    (clock, center)
}

#[test]
fn test_default_durations_by_kind() {
    let (clock, center) = center();
    let now = clock.now();

    center.add(NotificationKind::Otp, "Your OTP for verification is:", Some("123456".to_string()), None);
    center.add(NotificationKind::Info, "Voucher submitted", None, None);

    let active = center.active();
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].expires_at, now + Duration::milliseconds(30_000));
    assert_eq!(active[1].expires_at, now + Duration::milliseconds(5_000));
}

#[test]
fn test_expired_notifications_are_dropped() {
    let (clock, center) = center();
    center.add(NotificationKind::Success, "Approved", None, None);
    center.add(NotificationKind::Otp, "Your OTP for verification is:", Some("123456".to_string()), None);

    clock.advance(Duration::seconds(5));
    let active = center.active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].kind, NotificationKind::Otp);

    clock.advance(Duration::seconds(25));
    assert!(center.active().is_empty());
}

#[test]
fn test_explicit_duration_wins() {
    let (clock, center) = center();
    center.add(NotificationKind::Error, "Rejected", None, Some(60_000));

    clock.advance(Duration::seconds(59));
    assert_eq!(center.active().len(), 1);
}

#[test]
fn test_remove() {
    let (_, center) = center();
    let id = center.add(NotificationKind::Info, "Hello", None, None);

    assert!(center.remove(id));
    assert!(!center.remove(id));
    assert!(center.active().is_empty());
}

#[tokio::test]
async fn test_dispatch_surfaces_code_for_identifier() {
    let (_, center) = center();
    let notification = OtpNotification::new("Your OTP for verification is:", "482913", Some(30_000));

    center.dispatch("+919999999999", &notification).await.unwrap();
    center.add(NotificationKind::Info, "Unrelated", None, None);

    let mine = center.active_for("+919999999999");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].code.as_deref(), Some("482913"));
    assert_eq!(mine[0].kind, NotificationKind::Otp);
    assert!(center.active_for("+918888888888").is_empty());
}

#[test]
fn test_serialized_shape() {
    let (_, center) = center();
    center.add(NotificationKind::Otp, "Your OTP for verification is:", Some("482913".to_string()), None);

    let json = serde_json::to_value(&center.active()[0]).unwrap();
    assert_eq!(json["kind"], "otp");
    assert_eq!(json["code"], "482913");
    assert!(json.get("identifier").is_none());
}

#[tokio::test]
async fn test_unread_feed_stays_bounded() {
    let (clock, center) = center();
    let notification = OtpNotification::new("Your OTP for verification is:", "482913", Some(30_000));

    for _ in 0..500 {
        center.dispatch("+919999999999", &notification).await.unwrap();
        clock.advance(Duration::minutes(1));
    }

    assert_eq!(center.held_count(), 1);
    assert!(center.active().is_empty());
}
