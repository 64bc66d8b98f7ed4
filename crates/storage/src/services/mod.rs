//! Business rules on top of an [`EntityStore`](crate::store::EntityStore).
//!
//! Every operation takes the store as `&dyn EntityStore`, so the same code
//! runs against Postgres in production and [`MemoryStore`](crate::MemoryStore)
//! in tests.

pub mod error;
pub mod match_validator;
pub mod matches;
pub mod players;
pub mod report_builder;
pub mod result_processor;
pub mod teams;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{DomainError, DomainResult, ErrorKind, GoalViolation};
