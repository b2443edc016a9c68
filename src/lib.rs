//! EduSTEM - learner progress engine
//!
//! Students watch STEM videos and play learning games; every activity earns
//! experience points, advances per-subject progress, extends a daily learning
//! streak and may unlock achievements. This crate holds that engine:
//!
//! - [`progress`]: state model, pure transitions, storage and the
//!   [`progress::ProgressManager`] service that UI and game code call into.
//! - [`config`]: `~/.edustem/config.toml` (storage backend, record key,
//!   calendar day boundary).
//!
//! Rendering, the mini-games themselves and offline caching live elsewhere;
//! they only report events here and display what comes back.

pub mod config;
pub mod progress;

pub use config::Config;
pub use progress::{ActivityDetails, ActivityKind, ProgressEvent, ProgressManager, ProgressState};
