pub mod common;
pub mod matches;
pub mod player;
pub mod report;
pub mod team;
