//! Command-line surface.
//!
//! This module provides:
//! - `Cli`: The clap-derived command tree (`gmin batch-create users ...`)
//! - `InputFlags` / `MemberFlags`: Flags shared by every batch command
//! - `Cli::batch`: Resolution of a parsed invocation into a `BatchCommand`
//!   and its `BatchArgs`
//!
//! Verbs and nouns carry the short aliases operators type
//! (`gmin bcrt ou -i units.json`).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::command::{BatchArgs, BatchCommand};
use crate::model::{CallType, ObjectType};

/// Batch administration for a hosted directory.
#[derive(Debug, Parser)]
#[command(name = "gmin", version, about, propagate_version = true)]
pub struct Cli {
    /// Configuration file (overrides $GMIN_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `gmin=trace`
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create objects from a batch of records
    #[command(name = "batch-create", visible_alias = "bcrt")]
    BatchCreate {
        #[command(subcommand)]
        target: CreateTarget,
    },
    /// Delete objects named one per line
    #[command(name = "batch-delete", visible_alias = "bdel")]
    BatchDelete {
        #[command(subcommand)]
        target: DeleteTarget,
    },
    /// Update objects from a batch of records
    #[command(name = "batch-update", visible_alias = "bupd")]
    BatchUpdate {
        #[command(subcommand)]
        target: UpdateTarget,
    },
    /// Run device actions or apply settings
    #[command(name = "batch-manage", visible_alias = "bmng")]
    BatchManage {
        #[command(subcommand)]
        target: ManageTarget,
    },
    /// Move devices to an orgunit
    #[command(name = "batch-move", visible_alias = "bmv")]
    BatchMove {
        #[command(subcommand)]
        target: MoveTarget,
    },
    /// Restore deleted users
    #[command(name = "batch-undelete", visible_alias = "bund")]
    BatchUndelete {
        #[command(subcommand)]
        target: UndeleteTarget,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct InputFlags {
    /// Input file, `-` for stdin, or the spreadsheet id with `-f gsheet`
    #[arg(short = 'i', long = "input-file", value_name = "PATH")]
    pub input_file: Option<String>,

    /// csv, json, gsheet or text; inferred from the file extension if omitted
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    pub format: Option<String>,

    /// A1 range to read with `-f gsheet`
    #[arg(short = 's', long = "sheet-range", value_name = "RANGE")]
    pub sheet_range: Option<String>,

    /// Suppress per-record output lines
    #[arg(long)]
    pub silent: bool,
}

impl InputFlags {
    fn to_args(&self) -> BatchArgs {
        BatchArgs {
            input_file: self.input_file.clone(),
            format: self.format.clone(),
            sheet_range: self.sheet_range.clone(),
            group_key: None,
            silent: self.silent,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct MemberFlags {
    /// Email address or id of the group that owns the members
    #[arg(value_name = "GROUP_KEY")]
    pub group_key: String,

    #[command(flatten)]
    pub input: InputFlags,
}

impl MemberFlags {
    fn to_args(&self) -> BatchArgs {
        self.input.to_args().with_group_key(self.group_key.clone())
    }
}

#[derive(Debug, Subcommand)]
pub enum CreateTarget {
    #[command(visible_alias = "user")]
    Users(InputFlags),
    #[command(visible_alias = "group")]
    Groups(InputFlags),
    #[command(name = "group-members", visible_aliases = ["members", "grpmems"])]
    GroupMembers(MemberFlags),
    #[command(visible_aliases = ["orgunit", "ou"])]
    Orgunits(InputFlags),
}

#[derive(Debug, Subcommand)]
pub enum DeleteTarget {
    #[command(visible_alias = "user")]
    Users(InputFlags),
    #[command(visible_alias = "group")]
    Groups(InputFlags),
    #[command(name = "group-members", visible_aliases = ["members", "grpmems"])]
    GroupMembers(MemberFlags),
    #[command(visible_aliases = ["orgunit", "ou"])]
    Orgunits(InputFlags),
    #[command(name = "mobile-devices", visible_alias = "mobdev")]
    MobileDevices(InputFlags),
}

#[derive(Debug, Subcommand)]
pub enum UpdateTarget {
    #[command(visible_alias = "user")]
    Users(InputFlags),
    #[command(visible_alias = "group")]
    Groups(InputFlags),
    #[command(name = "group-members", visible_aliases = ["members", "grpmems"])]
    GroupMembers(MemberFlags),
    #[command(visible_aliases = ["orgunit", "ou"])]
    Orgunits(InputFlags),
    #[command(name = "chromeos-devices", visible_alias = "crosdev")]
    ChromeosDevices(InputFlags),
}

#[derive(Debug, Subcommand)]
pub enum ManageTarget {
    #[command(name = "chromeos-devices", visible_alias = "crosdev")]
    ChromeosDevices(InputFlags),
    #[command(name = "mobile-devices", visible_alias = "mobdev")]
    MobileDevices(InputFlags),
    #[command(name = "group-settings", visible_alias = "grpset")]
    GroupSettings(InputFlags),
}

#[derive(Debug, Subcommand)]
pub enum MoveTarget {
    #[command(name = "chromeos-devices", visible_alias = "crosdev")]
    ChromeosDevices(InputFlags),
}

#[derive(Debug, Subcommand)]
pub enum UndeleteTarget {
    #[command(visible_alias = "user")]
    Users(InputFlags),
}

impl Cli {
    /// The batch command this invocation names and its arguments.
    pub fn batch(&self) -> (BatchCommand, BatchArgs) {
        let (call, object, args) = match &self.command {
            Command::BatchCreate { target } => {
                let (object, args) = match target {
                    CreateTarget::Users(f) => (ObjectType::User, f.to_args()),
                    CreateTarget::Groups(f) => (ObjectType::Group, f.to_args()),
                    CreateTarget::GroupMembers(f) => (ObjectType::Member, f.to_args()),
                    CreateTarget::Orgunits(f) => (ObjectType::OrgUnit, f.to_args()),
                };
                (CallType::Create, object, args)
            }
            Command::BatchDelete { target } => {
                let (object, args) = match target {
                    DeleteTarget::Users(f) => (ObjectType::User, f.to_args()),
                    DeleteTarget::Groups(f) => (ObjectType::Group, f.to_args()),
                    DeleteTarget::GroupMembers(f) => (ObjectType::Member, f.to_args()),
                    DeleteTarget::Orgunits(f) => (ObjectType::OrgUnit, f.to_args()),
                    DeleteTarget::MobileDevices(f) => (ObjectType::MobileDevice, f.to_args()),
                };
                (CallType::Delete, object, args)
            }
            Command::BatchUpdate { target } => {
                let (object, args) = match target {
                    UpdateTarget::Users(f) => (ObjectType::User, f.to_args()),
                    UpdateTarget::Groups(f) => (ObjectType::Group, f.to_args()),
                    UpdateTarget::GroupMembers(f) => (ObjectType::Member, f.to_args()),
                    UpdateTarget::Orgunits(f) => (ObjectType::OrgUnit, f.to_args()),
                    UpdateTarget::ChromeosDevices(f) => (ObjectType::ChromeOsDevice, f.to_args()),
                };
                (CallType::Update, object, args)
            }
            Command::BatchManage { target } => {
                let (object, args) = match target {
                    ManageTarget::ChromeosDevices(f) => (ObjectType::ChromeOsDevice, f.to_args()),
                    ManageTarget::MobileDevices(f) => (ObjectType::MobileDevice, f.to_args()),
                    ManageTarget::GroupSettings(f) => (ObjectType::GroupSettings, f.to_args()),
                };
                (CallType::Manage, object, args)
            }
            Command::BatchMove { target } => {
                let MoveTarget::ChromeosDevices(f) = target;
                (CallType::Move, ObjectType::ChromeOsDevice, f.to_args())
            }
            Command::BatchUndelete { target } => {
                let UndeleteTarget::Users(f) = target;
                (CallType::Undelete, ObjectType::User, f.to_args())
            }
        };
        (BatchCommand::new(call, object), args)
    }
}
