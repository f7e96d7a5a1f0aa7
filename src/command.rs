// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;
use std::io;
use std::process::{Command, Stdio};

/// An external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs external programs, blocking until they exit
///
/// Exit statuses are not reported; only a failure to start the program is.
pub trait CommandRunner {
    /// Run a single command
    fn run(&self, command: &CommandSpec) -> io::Result<()>;

    /// Run `from` with its stdout connected to the stdin of `into`
    fn pipe(&self, from: &CommandSpec, into: &CommandSpec) -> io::Result<()>;
}

/// CommandRunner spawning real processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &CommandSpec) -> io::Result<()> {
        log::debug!("Running `{}`", command);
        let status = Command::new(&command.program)
            .args(&command.args)
            .status()?;
        log::debug!("`{}` exited with {}", command.program, status);
        Ok(())
    }

    fn pipe(&self, from: &CommandSpec, into: &CommandSpec) -> io::Result<()> {
        log::debug!("Running `{} | {}`", from, into);
        let mut producer = Command::new(&from.program)
            .args(&from.args)
            .stdout(Stdio::piped())
            .spawn()?;

        let Some(stdout) = producer.stdout.take() else {
            producer.wait()?;
            return Ok(());
        };

        let consumer = Command::new(&into.program)
            .args(&into.args)
            .stdin(Stdio::from(stdout))
            .status();

        producer.wait()?;
        consumer?;
        Ok(())
    }
}
