//! CLI argument parsing for macbots

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::snapshot::{DEFAULT_BOTMAP, DEFAULT_BUILDERMAP};

/// Output layout for the vms report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VmsFormat {
    /// Sorted, unique hostnames, one per line (default)
    #[default]
    Sorted,
    /// Per builder: name, hostname list as a JSON array, separator line
    Legacy,
}

/// Report selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    ListMasters,
    ListBuilders(String),
    ListVms(String),
}

impl Mode {
    /// Only the vms report joins against the builder snapshot
    pub fn needs_builder_snapshot(&self) -> bool {
        matches!(self, Mode::ListVms(_))
    }
}

#[derive(Parser, Debug)]
#[command(name = "macbots")]
#[command(version)]
#[command(about = "Utility for working with infra mac bots", long_about = None)]
pub struct Cli {
    /// List masters that have relevant mac bots
    #[arg(long = "list_masters")]
    pub list_masters: bool,

    /// List builders for master
    #[arg(long = "list_builders", value_name = "MASTER")]
    pub list_builders: Option<String>,

    /// List vms backing the builders for master
    #[arg(long = "list_vms", value_name = "MASTER")]
    pub list_vms: Option<String>,

    /// Bot snapshot (JSON array of bot records)
    #[arg(long = "botmap", value_name = "PATH", default_value = DEFAULT_BOTMAP)]
    pub botmap: PathBuf,

    /// Builder snapshot (JSON array of builder-to-hostname records)
    #[arg(long = "buildermap", value_name = "PATH", default_value = DEFAULT_BUILDERMAP)]
    pub buildermap: PathBuf,

    /// TOML file replacing the built-in master/builder blocklists
    #[arg(long = "blocklist", value_name = "PATH")]
    pub blocklist: Option<PathBuf>,

    /// Output layout for --list_vms
    #[arg(long = "vms-format", value_enum, default_value = "sorted")]
    pub vms_format: VmsFormat,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// The first requested report, in priority order masters, builders, vms.
    /// An empty master name counts as not requested.
    pub fn mode(&self) -> Option<Mode> {
        if self.list_masters {
            return Some(Mode::ListMasters);
        }
        if let Some(master) = non_empty(&self.list_builders) {
            return Some(Mode::ListBuilders(master.to_string()));
        }
        non_empty(&self.list_vms).map(|master| Mode::ListVms(master.to_string()))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
