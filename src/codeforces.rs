pub mod api;
pub mod contests;
pub mod problems;
pub mod rating_changes;
pub mod ratings;
pub mod types;
