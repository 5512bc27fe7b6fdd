//! Core data models for the replay summary engine.

mod benchmark;
mod damage;
mod event;
mod hero;
mod interval;
mod summary;
mod team;

pub use benchmark::*;
pub use damage::*;
pub use event::*;
pub use hero::*;
pub use interval::*;
pub use summary::*;
pub use team::*;
