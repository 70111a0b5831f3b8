//! # Storage Layer
//!
//! Local files kept by the client. Everything authoritative lives on the
//! backend; these files only remember settings and the last session.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Config | TOML | `{home}/config.toml` |
//! | Session | JSON | `{home}/session.json` |
//!
//! `{home}` is `$REGSIM_HOME`, or the platform config directory.
//! Session writes are atomic (temp file + rename).

mod config;
mod home;
mod session;

pub use config::{Config, ConfigError, DefaultFormat, HOME_ENV};
pub use home::{Home, HomeError};
pub use session::{Session, SessionError, SessionStore};
