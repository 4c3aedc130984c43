use crate::{
    command::{CommandRunner, SystemRunner},
    error::Result,
};

use super::{ColumnSpec, ListingSource};

const NETSTAT_ARGS: &[&str] = &["-ano"];

/// `netstat -ano` as found on Windows and anything not otherwise recognised.
/// Local address in column 1, bare PID in column 4.
#[derive(Debug, Clone)]
pub struct OtherAdapter<R = SystemRunner> {
    program: String,
    runner: R,
}

impl OtherAdapter {
    pub const COLUMNS: ColumnSpec = ColumnSpec::new(1, 4);

    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(program, SystemRunner)
    }
}

impl<R: CommandRunner> OtherAdapter<R> {
    pub fn with_runner(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }
}

impl<R: CommandRunner> ListingSource for OtherAdapter<R> {
    fn columns(&self) -> ColumnSpec {
        OtherAdapter::COLUMNS
    }

    fn fetch_raw_listing(&self) -> Result<String> {
        self.runner.run(&self.program, NETSTAT_ARGS)
    }
}
