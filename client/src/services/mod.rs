//! Services module
//!
//! Business logic services that coordinate between commands, the remote
//! API clients and the local store.

pub mod session;
pub mod settings;
pub mod sync;

pub use session::SessionService;
pub use settings::{AppSettings, SettingsService};
pub use sync::{AnnotationSynchronizer, ToggleOutcome};
