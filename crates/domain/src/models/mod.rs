//! Domain models for EventGate.

pub mod checkin;
pub mod event;
pub mod qr_payload;
pub mod registration;

pub use checkin::{CheckinMethod, CheckinOutcome, CheckinRecord};
pub use event::Event;
pub use qr_payload::{QrPayload, QrPayloadError, QrPurpose};
pub use registration::{generate_ticket_code, PaymentStatus, Registration, RegistrationStatus};
