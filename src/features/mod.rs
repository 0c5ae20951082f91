//! Dashboard features.
//!
//! Each feature owns the value shapes behind its cache keys and goes
//! through the synced cache for every read and write. Features receive the
//! cache at construction; none of them hold state of their own.

pub mod calendar;
pub mod fitness;
pub mod goals;
pub mod three_things;
pub mod writing;
