//! Command handlers for the `vel` CLI.

pub mod components_cmd;
pub mod eval;
pub mod functions_cmd;
pub mod get;
pub mod initiative;
pub mod roll;
pub mod template_cmd;
pub mod version;
