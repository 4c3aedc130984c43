use crate::{
    command::{CommandRunner, SystemRunner},
    error::Result,
};

use super::{ColumnSpec, ListingSource};

const SS_ARGS: &[&str] = &["-tunlp"];

/// `ss -tunlp`: local address in column 4, `users:((...,pid=N,...))` in column 6.
#[derive(Debug, Clone)]
pub struct LinuxAdapter<R = SystemRunner> {
    program: String,
    runner: R,
}

impl LinuxAdapter {
    pub const COLUMNS: ColumnSpec = ColumnSpec::new(4, 6);

    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(program, SystemRunner)
    }
}

impl<R: CommandRunner> LinuxAdapter<R> {
    pub fn with_runner(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }
}

impl<R: CommandRunner> ListingSource for LinuxAdapter<R> {
    fn columns(&self) -> ColumnSpec {
        LinuxAdapter::COLUMNS
    }

    fn fetch_raw_listing(&self) -> Result<String> {
        self.runner.run(&self.program, SS_ARGS)
    }
}
