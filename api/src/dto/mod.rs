//! Request and response payloads

pub mod notification;
pub mod otp;

pub use notification::NotificationQuery;
pub use otp::{SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse};
