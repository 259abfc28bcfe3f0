//! linecrew-core: the staffing core for one production line.
//!
//! Assigns people to work-area slots and lead roles, rotates everyone
//! through numbered break/lunch slots, and reports a line-health
//! knowledge score. Pure functions over value snapshots: callers hand
//! in roster/slot/config state and apply the returned state
//! atomically. UI, persistence, and line setup live elsewhere.

pub mod assignment;
pub mod break_schedule;
pub mod config;
pub mod error;
pub mod health;
pub mod report;
pub mod rng;
pub mod roster;
pub mod skill;
pub mod slots;
pub mod snapshot;
pub mod types;
