//! Self-hosted photo drop. Upload, list, delete.
//!
//! The crate is split the usual way: a data model ([`Photo`]) persisted
//! through a small keyed [`db`] layer, and an [`axum`] surface exposing the
//! three photo actions over HTTP. Everything else (config, tracing, seeding,
//! mock data) is plumbing around those two.

#[macro_use]
extern crate serde_derive;

pub mod config;
pub mod db;
pub mod error;
pub mod init;
pub mod mock;
pub mod photo;
pub mod tracing;
pub mod util;

#[cfg(feature = "axum")]
pub mod axum;

pub use config::Config;
pub use db::Database;
pub use error::{Error, ErrorKind, Result};
pub use photo::{Photo, PhotoId, PhotoUpload};
