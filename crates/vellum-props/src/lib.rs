//! Property bag access for the vellum system.
//!
//! An entity's custom data (`props`) is an arbitrarily nested JSON object
//! owned by the host document. This crate parses dotted/bracketed key paths,
//! resolves them against a bag, and provides threshold-table lookups. The
//! resolver never fails hard: missing keys degrade to a caller-supplied
//! default, because sheets routinely reference optional fields.

pub mod path;
pub mod resolve;
pub mod table;
