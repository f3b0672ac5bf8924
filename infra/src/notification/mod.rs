//! Notification module
//!
//! Delivery channels for freshly issued codes:
//! - [`NotificationCenter`]: in-app notification feed
//! - [`SmsNotificationSink`]: texts the code to the identifier's phone
//! - [`FanoutSink`]: forwards to several channels at once

pub mod center;
pub mod fanout;
pub mod sms_sink;

#[cfg(test)]
mod tests;

pub use center::{Notification, NotificationCenter};
pub use fanout::FanoutSink;
pub use sms_sink::SmsNotificationSink;
