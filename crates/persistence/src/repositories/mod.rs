//! Repository implementations for database operations.

pub mod checkin;
pub mod event;
pub mod registration;

pub use checkin::CheckinRepository;
pub use event::EventRepository;
pub use registration::RegistrationRepository;
