// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External process invocation requests.

use std::collections::HashMap;
use std::time::Duration;

/// Timeout applied when the builder is not given one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors rejected at spec construction time.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// The executable name was empty.
    #[error("executable name is empty")]
    EmptyExecutable,

    /// The timeout was zero.
    #[error("timeout must be positive")]
    ZeroTimeout,
}

/// A fully-specified external process invocation: executable, ordered
/// arguments, environment overrides, timeout, and optional stdin payload.
///
/// Immutable once built. Environment overrides are applied on top of the
/// ambient process environment; override wins on key collision.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    executable: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    timeout: Duration,
    stdin: Option<String>,
}

impl CommandSpec {
    /// Start building a spec for `executable`.
    pub fn new(executable: impl Into<String>) -> CommandSpecBuilder {
        CommandSpecBuilder {
            executable: executable.into(),
            args: Vec::new(),
            env: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
            stdin: None,
        }
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn stdin(&self) -> Option<&str> {
        self.stdin.as_deref()
    }
}

/// Builder for [`CommandSpec`]. Validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct CommandSpecBuilder {
    executable: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    timeout: Duration,
    stdin: Option<String>,
}

impl CommandSpecBuilder {
    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments, preserving order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set one environment override. Keys are unique; setting the same key
    /// again replaces the earlier value.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set multiple environment overrides.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the timeout. Must be positive.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Feed `data` to the process on standard input.
    pub fn stdin(mut self, data: impl Into<String>) -> Self {
        self.stdin = Some(data.into());
        self
    }

    /// Validate and freeze the spec.
    pub fn build(self) -> Result<CommandSpec, SpecError> {
        if self.executable.is_empty() {
            return Err(SpecError::EmptyExecutable);
        }
        if self.timeout.is_zero() {
            return Err(SpecError::ZeroTimeout);
        }
        Ok(CommandSpec {
            executable: self.executable,
            args: self.args,
            env: self.env,
            timeout: self.timeout,
            stdin: self.stdin,
        })
    }
}

#[cfg(test)]
#[path = "spec_tests.rs"]
mod tests;
