#![forbid(unsafe_code)]

//! Domain core of the adaptive study engine: the data model, per-item
//! mastery tracking, the weighted session scheduler, topic error
//! aggregation, and question-to-vocabulary link detection. Everything here
//! is pure and synchronous; persistence and orchestration live in the
//! `storage` and `services` crates.

pub mod linker;
pub mod mastery;
pub mod model;
pub mod scheduler;
pub mod time;

pub use time::Clock;
