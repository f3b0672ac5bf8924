//! Unit tests for the OTP service
