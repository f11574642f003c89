//! Use-case services over document collections.
//!
//! # Responsibility
//! - Provide the generic collection manager and form session.
//! - Provide typed facades for skills, team members and contact messages.
//! - Keep callers decoupled from the concrete `CollectionStore`.

pub mod collection;
pub mod contact;
pub mod session;
pub mod skills;
pub mod team;
