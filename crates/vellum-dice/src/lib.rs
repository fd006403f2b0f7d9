//! Dice notation and evaluation for the vellum system.
//!
//! Supports `NdM` notation with keep/drop/reroll suffixes (`4d6kh3`,
//! `2d20kl1`, `3d6r2`). Rolling goes through the [`source::RandomSource`]
//! trait so tests and replayable computations can supply fixed faces.

pub mod roll;
pub mod source;
pub mod spec;
