pub mod booking;
pub mod common;
pub mod organizer;
pub mod pricing;
