// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! The run returns `ExitError` instead of calling `std::process::exit()`
//! directly, so `main()` owns process termination.

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: u8,
    pub message: String,
}

impl ExitError {
    /// Exit code for any fatal error
    pub const FATAL: u8 = 1;
    /// Exit code after SIGINT
    pub const INTERRUPTED: u8 = 130;

    pub fn new(code: u8, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    /// Resolve the exit code for an error bubbling out of the run.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        match err.downcast::<ExitError>() {
            Ok(exit) => exit,
            Err(err) => Self::new(Self::FATAL, format!("{err:#}")),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
