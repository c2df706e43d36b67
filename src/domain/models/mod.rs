pub mod booking;
pub mod calendar_policy;
pub mod court;
