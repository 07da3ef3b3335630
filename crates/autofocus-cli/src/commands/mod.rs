pub mod graph;
pub mod schedule;
pub mod trigger;
