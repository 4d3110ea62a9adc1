// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rounds-core: external-command execution and structured-result framework
//! for the rounds CLI.

pub mod classify;
pub mod metric;
pub mod payload;
pub mod result;
pub mod runner;
pub mod spec;

pub use classify::StatusPolicy;
pub use metric::{percent_of, MetricLine, MetricValue, Thresholds};
pub use payload::{fold_pairs, parse_json, parse_table_lines, Records};
pub use result::{CommandResult, SENTINEL_EXIT};
pub use runner::run;
pub use spec::{CommandSpec, CommandSpecBuilder, SpecError, DEFAULT_TIMEOUT};
