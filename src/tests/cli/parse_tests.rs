//! Command tree parsing.

use clap::Parser;

use crate::cli::Cli;
use crate::command::BatchCommand;
use crate::logging::filter_directive;
use crate::model::{CallType, ObjectType};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("gmin").chain(args.iter().copied())).expect("parse")
}

#[test]
fn long_form_with_shared_flags() {
    let cli = parse(&[
        "batch-create",
        "users",
        "--input-file",
        "users.csv",
        "--format",
        "csv",
        "--silent",
    ]);
    let (command, args) = cli.batch();
    assert_eq!(command, BatchCommand::new(CallType::Create, ObjectType::User));
    assert_eq!(args.input_file.as_deref(), Some("users.csv"));
    assert_eq!(args.format.as_deref(), Some("csv"));
    assert!(args.silent);
}

#[test]
fn aliases_resolve_to_the_same_command() {
    let (command, args) = parse(&["bcrt", "ou", "-i", "units.json"]).batch();
    assert_eq!(command, BatchCommand::new(CallType::Create, ObjectType::OrgUnit));
    assert_eq!(args.input_file.as_deref(), Some("units.json"));

    let (command, _) = parse(&["bmng", "crosdev"]).batch();
    assert_eq!(
        command,
        BatchCommand::new(CallType::Manage, ObjectType::ChromeOsDevice)
    );

    let (command, _) = parse(&["bdel", "mobdev", "-f", "text"]).batch();
    assert_eq!(
        command,
        BatchCommand::new(CallType::Delete, ObjectType::MobileDevice)
    );
}

#[test]
fn member_commands_take_a_group_key() {
    let (command, args) = parse(&["batch-delete", "group-members", "sales@x.io", "-f", "gsheet", "-i", "sheet-id", "-s", "A1:A50"]).batch();
    assert_eq!(command, BatchCommand::new(CallType::Delete, ObjectType::Member));
    assert_eq!(args.group_key.as_deref(), Some("sales@x.io"));
    assert_eq!(args.sheet_range.as_deref(), Some("A1:A50"));

    assert!(Cli::try_parse_from(["gmin", "batch-create", "group-members"]).is_err());
}

#[test]
fn global_flags_may_follow_the_subcommand() {
    let cli = parse(&["batch-undelete", "users", "--log-level", "debug", "--config", "/etc/gmin.toml"]);
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/etc/gmin.toml")));
    let (command, _) = cli.batch();
    assert_eq!(command, BatchCommand::new(CallType::Undelete, ObjectType::User));
}

#[test]
fn unsupported_pairs_do_not_parse() {
    assert!(Cli::try_parse_from(["gmin", "batch-move", "users"]).is_err());
    assert!(Cli::try_parse_from(["gmin", "batch-undelete", "groups"]).is_err());
}

#[test]
fn every_parsed_command_is_a_known_batch_command() {
    let invocations: &[&[&str]] = &[
        &["bcrt", "users"],
        &["bcrt", "groups"],
        &["bcrt", "group-members", "g@x.io"],
        &["bcrt", "orgunits"],
        &["bdel", "users"],
        &["bdel", "groups"],
        &["bdel", "group-members", "g@x.io"],
        &["bdel", "orgunits"],
        &["bdel", "mobile-devices"],
        &["bupd", "users"],
        &["bupd", "groups"],
        &["bupd", "group-members", "g@x.io"],
        &["bupd", "orgunits"],
        &["bupd", "chromeos-devices"],
        &["bmng", "chromeos-devices"],
        &["bmng", "mobile-devices"],
        &["bmng", "group-settings"],
        &["bmv", "chromeos-devices"],
        &["bund", "users"],
    ];
    assert_eq!(invocations.len(), BatchCommand::ALL.len());
    for args in invocations {
        let (command, _) = parse(args).batch();
        assert!(
            BatchCommand::find(command.call, command.object).is_some(),
            "{command} is not a known command"
        );
    }
}

#[test]
fn log_filter_precedence() {
    assert_eq!(filter_directive(Some("debug"), Some("warn"), "info"), "debug");
    assert_eq!(filter_directive(None, Some("warn"), "info"), "warn");
    assert_eq!(filter_directive(None, None, "error"), "error");
    assert_eq!(filter_directive(None, Some(" "), "info"), "info");
}
