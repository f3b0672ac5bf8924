//! # Payment Voucher Core
//!
//! Core business logic for the payment voucher approval backend.
//! Authentication, persistence of vouchers and role enforcement live in the
//! hosted backend; this crate owns the one-time password flow used to confirm
//! possession of a phone number: entities, the issuance/verification service,
//! the store and notification seams it depends on, and expiry sweeping.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
