//! Record model and per-collection domain shapes.
//!
//! # Responsibility
//! - Define the generic document shape (`Record`) shared by every collection.
//! - Define typed projections (skills, team members, contact messages) and
//!   their conversions to and from `Fields`.
//!
//! # Invariants
//! - `RecordId` is assigned by the store and never rewritten by the client.
//! - Closed label sets (`SkillCategory`, `ProjectType`) have exactly one
//!   definition in this module tree.

pub mod contact;
pub mod record;
pub mod skill;
pub mod team;
pub mod validation;
