use crate::command::{BatchArgs, BatchCommand};
use crate::error::InputError;
use crate::format::FormatKind;
use crate::model::{CallType, ObjectType};

fn command(call: CallType, object: ObjectType) -> BatchCommand {
    BatchCommand::find(call, object).expect("known command")
}

#[test]
fn deletes_default_to_text_and_others_to_json() {
    let delete = command(CallType::Delete, ObjectType::Group);
    assert_eq!(delete.resolve_format(&BatchArgs::new()).unwrap(), FormatKind::Text);

    let create = command(CallType::Create, ObjectType::User);
    assert_eq!(create.resolve_format(&BatchArgs::new()).unwrap(), FormatKind::Json);
}

#[test]
fn flag_beats_extension() {
    let create = command(CallType::Create, ObjectType::User);
    let args = BatchArgs::new()
        .with_input_file("users.json")
        .with_format("csv");
    assert_eq!(create.resolve_format(&args).unwrap(), FormatKind::Csv);

    let inferred = BatchArgs::new().with_input_file("users.csv");
    assert_eq!(create.resolve_format(&inferred).unwrap(), FormatKind::Csv);
}

#[test]
fn formats_outside_the_command_set_are_rejected() {
    let delete = command(CallType::Delete, ObjectType::User);
    let err = delete
        .resolve_format(&BatchArgs::new().with_format("csv"))
        .unwrap_err();
    assert!(matches!(
        err,
        InputError::UnsupportedFormat {
            format: FormatKind::Csv,
            ..
        }
    ));

    let create = command(CallType::Create, ObjectType::Group);
    assert!(create
        .resolve_format(&BatchArgs::new().with_input_file("groups.txt"))
        .is_err());
}

#[test]
fn unknown_format_flag_is_an_input_error() {
    let create = command(CallType::Create, ObjectType::User);
    let err = create
        .resolve_format(&BatchArgs::new().with_format("xlsx"))
        .unwrap_err();
    assert!(matches!(err, InputError::UnknownFormat(ref f) if f == "xlsx"));
}

#[test]
fn command_table_matches_the_cli_surface() {
    assert_eq!(BatchCommand::ALL.len(), 19);
    assert!(BatchCommand::find(CallType::Move, ObjectType::User).is_none());
    assert_eq!(
        command(CallType::Manage, ObjectType::ChromeOsDevice).to_string(),
        "batch-manage chromeos device"
    );
    for command in BatchCommand::ALL {
        assert!(command.accepted_formats().contains(&FormatKind::GSheet));
    }
}
