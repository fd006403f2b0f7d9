//! Sheet components for the vellum system.
//!
//! A sheet template is a tree of component descriptors -- serializable
//! configuration objects describing one field or container each. The
//! [`registry::ComponentRegistry`] maps a descriptor's `type` tag to a
//! factory producing a live, polymorphic [`component::Component`] that can
//! serialize itself back, render into a host-agnostic UI tree, pull its
//! value out of a submitted form, and validate constraints.
//!
//! Unlike formula evaluation, descriptor instantiation fails hard: an
//! unknown `type` tag means a broken template that cannot safely render.

pub mod component;
pub mod descriptor;
pub mod kinds;
pub mod registry;
pub mod template;
