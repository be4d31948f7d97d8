//! `rollcall` - Student registration with an administrator login
//!
//! This library provides the core functionality for registering students and
//! authenticating an administrator, with all state persisted in a local
//! string-keyed key-value store.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod capitalize;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod logging;
pub mod registry;
pub mod storage;
pub mod student;
pub mod validate;

pub use capitalize::capitalize;
pub use config::Config;
pub use credentials::{AdminCredential, CredentialStore};
pub use error::{Error, Result};
pub use guard::{LoginForm, NavigationDecision, Route, SessionGuard, SessionReset};
pub use logging::init_logging;
pub use registry::StudentRegistry;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use student::StudentRecord;
pub use validate::StudentRules;
