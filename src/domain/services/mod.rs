pub mod availability;
pub mod calendar;
pub mod locks;
pub mod pricing;
pub mod timeslot;
pub mod venue;
