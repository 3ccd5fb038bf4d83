// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod arg;
mod cli;
mod cmd_backup;
mod cmd_event;
mod cmd_export;
mod cmd_generate_completion;
mod cmd_import;
mod cmd_month;
mod cmd_settings;
mod cmd_tag;
mod config;
mod event_formatter;
mod month_view;
mod table;
mod util;

pub use crate::cli::{Cli, Commands, run};
