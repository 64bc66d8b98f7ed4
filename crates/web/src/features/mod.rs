pub mod matches;
pub mod players;
pub mod reports;
pub mod teams;
