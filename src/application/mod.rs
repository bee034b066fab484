//! Application services (use cases).
//!
//! These services orchestrate domain logic and drive the entity store
//! through its transactional port.

pub mod catalog;
pub mod position;
