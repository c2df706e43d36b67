pub mod sqlite_booking_repo;
pub mod sqlite_court_repo;
pub mod sqlite_policy_repo;
