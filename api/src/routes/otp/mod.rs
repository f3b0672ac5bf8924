//! One-time password route handlers

pub mod send_otp;
pub mod verify_otp;

pub use send_otp::send_otp;
pub use verify_otp::verify_otp;
