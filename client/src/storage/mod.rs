//! Storage module
//!
//! Client-side state owned by the current session.

pub mod annotations;

pub use annotations::AnnotationStore;
