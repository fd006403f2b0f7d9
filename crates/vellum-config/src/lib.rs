//! System settings for the vellum system.
//!
//! A game system carries a small amount of table-wide configuration (default
//! value policy, the initiative formula) in a `vellum.yaml` file. Loading is
//! explicit at startup and the resulting [`settings::SystemSettings`] value
//! is passed into computations as a parameter, never read ambiently.

pub mod settings;
