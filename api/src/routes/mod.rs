//! Route handlers
//!
//! - `otp` - issuing and verifying one-time codes
//! - `notifications` - in-app notification feed
//! - `health` - liveness probe

pub mod health;
pub mod notifications;
pub mod otp;
