pub mod availability;
pub mod booking;
pub mod calendar_policy;
pub mod court;
pub mod health;
pub mod venue;
