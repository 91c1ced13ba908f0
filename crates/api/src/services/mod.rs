//! Application services.

pub mod checkin;
pub mod checkin_feed;

pub use checkin::{CheckinError, CheckinRecorder};
pub use checkin_feed::CheckinFeed;
