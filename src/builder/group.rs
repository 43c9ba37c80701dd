use super::{RecordView, ensure_changes, unsupported};
use crate::error::RecordError;
use crate::model::{CallType, Group, GroupOp, Payload};

pub(super) fn build(view: &RecordView<'_>) -> Result<Payload, RecordError> {
    view.check_required()?;
    let op = match view.call {
        CallType::Create => GroupOp::Create(Group {
            email: Some(view.required_email("email")?),
            ..body(view)?
        }),
        CallType::Update => {
            let group_key = view.required_str("groupKey")?;
            let body = Group {
                email: view.email("email")?,
                ..body(view)?
            };
            ensure_changes(body != Group::default())?;
            GroupOp::Update { group_key, body }
        }
        CallType::Delete => GroupOp::Delete {
            group_key: view.required_str("groupKey")?,
        },
        call => return Err(unsupported(view.object, call)),
    };
    Ok(Payload::Group(op))
}

fn body(view: &RecordView<'_>) -> Result<Group, RecordError> {
    Ok(Group {
        email: None,
        name: view.str("name")?,
        description: view.str("description")?,
    })
}
