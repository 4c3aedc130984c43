pub mod command;
pub mod config;
pub mod error;
pub mod pid;
pub mod platform;
pub mod resolver;
pub mod table;

pub use error::{Error, Result};
pub use platform::{ColumnSpec, ListingSource, Platform, listing_source};
pub use resolver::{PortQuery, QueryOutcome, Resolver};
