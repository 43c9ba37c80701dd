use super::{BuildContext, RecordView, ensure_changes, unsupported};
use crate::error::RecordError;
use crate::model::{CallType, Member, MemberOp, Payload};

pub(super) fn build(view: &RecordView<'_>, ctx: &BuildContext) -> Result<Payload, RecordError> {
    view.check_required()?;
    let group_key = ctx
        .group_key
        .clone()
        .filter(|k| !k.is_empty())
        .ok_or_else(|| RecordError::MissingRequiredField {
            field: "groupKey".to_string(),
        })?;

    let op = match view.call {
        CallType::Create => MemberOp::Create {
            group_key,
            member: Member {
                email: Some(view.required_email("email")?),
                ..settings(view)?
            },
        },
        CallType::Update => {
            let member_key = view.required_str("memberKey")?;
            let body = settings(view)?;
            ensure_changes(body != Member::default())?;
            MemberOp::Update {
                group_key,
                member_key,
                body,
            }
        }
        CallType::Delete => MemberOp::Delete {
            group_key,
            member_key: view.required_str("memberKey")?,
        },
        call => return Err(unsupported(view.object, call)),
    };
    Ok(Payload::Member(op))
}

fn settings(view: &RecordView<'_>) -> Result<Member, RecordError> {
    Ok(Member {
        email: None,
        role: view.enumerated("role")?,
        delivery_settings: view.enumerated("deliverySettings")?,
        member_type: view.enumerated("type")?,
    })
}
