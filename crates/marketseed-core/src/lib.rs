//! Core contracts shared by the marketseed crates.
//!
//! This crate defines the marketplace row model, table descriptors, typed ID
//! pools, the `RowSink` seam implemented by storage backends, and connection
//! settings with redaction helpers.

pub mod connection;
pub mod error;
pub mod model;
pub mod pool;
pub mod redaction;
pub mod sink;
pub mod table;

pub use connection::ConnectionSettings;
pub use error::{Error, Result};
pub use model::{
    AccountStatus, Advert, AdvertStatus, Advertiser, Category, FieldValue, Job, JobKey,
    Notification, Offer, OfferStatus, Role, User,
};
pub use pool::IdPool;
pub use redaction::RedactedConnection;
pub use sink::RowSink;
pub use table::{Row, TableSpec, SEED_ORDER};
