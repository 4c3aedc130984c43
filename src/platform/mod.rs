use std::sync::OnceLock;

use serde::Deserialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::{config::CommandConfig, error::Result};

pub use linux::LinuxAdapter;
pub use macos::MacAdapter;
pub use windows::OtherAdapter;

/// Host operating system family, as far as port listing is concerned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, IntoStaticStr, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Macos,
    Linux,
    Other,
}

impl Platform {
    /// Maps the compile-time target OS onto a platform family.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Platform of the running process, detected on first use.
    #[must_use]
    pub fn current() -> Self {
        static CURRENT: OnceLock<Platform> = OnceLock::new();
        *CURRENT.get_or_init(Self::detect)
    }

    #[must_use]
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "macos" => Self::Macos,
            "linux" => Self::Linux,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn columns(self) -> ColumnSpec {
        match self {
            Self::Macos => MacAdapter::COLUMNS,
            Self::Linux => LinuxAdapter::COLUMNS,
            Self::Other => OtherAdapter::COLUMNS,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Which whitespace-delimited columns of a socket row hold the local
/// address and the owning process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub address: usize,
    pub owner: usize,
}

impl ColumnSpec {
    #[must_use]
    pub const fn new(address: usize, owner: usize) -> Self {
        Self { address, owner }
    }
}

/// Source of the raw socket listing for one platform.
pub trait ListingSource: Send + Sync {
    /// Column layout of the text returned by [`Self::fetch_raw_listing`].
    fn columns(&self) -> ColumnSpec;

    /// Runs the platform utility and returns its complete output.
    ///
    /// # Errors
    ///
    /// Returns an execution error if the utility is missing, cannot be
    /// started, or exits with a non-zero status.
    fn fetch_raw_listing(&self) -> Result<String>;
}

/// Builds the adapter for `platform`, using the program names in `commands`.
#[must_use]
pub fn listing_source(platform: Platform, commands: &CommandConfig) -> Box<dyn ListingSource> {
    match platform {
        Platform::Macos => Box::new(MacAdapter::new(commands.netstat.clone())),
        Platform::Linux => Box::new(LinuxAdapter::new(commands.ss.clone())),
        Platform::Other => Box::new(OtherAdapter::new(commands.netstat.clone())),
    }
}

mod linux;
mod macos;
mod windows;
