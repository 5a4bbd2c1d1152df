//! State module for tracking crawl progress
//!
//! `UnitState` tracks where a single crawl unit is in its life:
//! dequeue, fetch, expand, spawn, and one of the two terminal states.

mod unit_state;

pub use unit_state::UnitState;
