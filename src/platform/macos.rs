use std::thread;

use crate::{
    command::{CommandRunner, SystemRunner, display_command},
    error::{Error, Result},
};

use super::{ColumnSpec, ListingSource};

const TCP_ARGS: &[&str] = &["-anv", "-p", "tcp"];
const UDP_ARGS: &[&str] = &["-anv", "-p", "udp"];

/// `netstat -anv`, once per protocol. Local address in column 3 (`host.port`),
/// PID in column 8.
#[derive(Debug, Clone)]
pub struct MacAdapter<R = SystemRunner> {
    program: String,
    runner: R,
}

impl MacAdapter {
    pub const COLUMNS: ColumnSpec = ColumnSpec::new(3, 8);

    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(program, SystemRunner)
    }
}

impl<R: CommandRunner> MacAdapter<R> {
    pub fn with_runner(program: impl Into<String>, runner: R) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    fn netstat(&self, args: &[&str]) -> Result<String> {
        self.runner.run(&self.program, args)
    }
}

impl<R: CommandRunner> ListingSource for MacAdapter<R> {
    fn columns(&self) -> ColumnSpec {
        MacAdapter::COLUMNS
    }

    fn fetch_raw_listing(&self) -> Result<String> {
        // Both invocations are started before either is awaited.
        let (tcp, udp) = thread::scope(|scope| {
            let tcp = scope.spawn(|| self.netstat(TCP_ARGS));
            let udp = scope.spawn(|| self.netstat(UDP_ARGS));

            let tcp = tcp.join().map_err(|_| Error::Panicked {
                command: display_command(&self.program, TCP_ARGS),
            });
            let udp = udp.join().map_err(|_| Error::Panicked {
                command: display_command(&self.program, UDP_ARGS),
            });
            (tcp, udp)
        });

        let tcp = tcp??;
        let udp = udp??;

        Ok(format!("{tcp}\n{udp}"))
    }
}
