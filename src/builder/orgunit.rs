use super::{RecordView, ensure_changes, unsupported};
use crate::error::RecordError;
use crate::model::{CallType, OrgUnit, OrgUnitOp, Payload};

pub(super) fn build(view: &RecordView<'_>) -> Result<Payload, RecordError> {
    view.check_required()?;
    let op = match view.call {
        CallType::Create => OrgUnitOp::Create(body(view)?),
        CallType::Update => {
            let ou_key = view.required_str("ouKey")?;
            let body = body(view)?;
            ensure_changes(body != OrgUnit::default())?;
            OrgUnitOp::Update { ou_key, body }
        }
        CallType::Delete => OrgUnitOp::Delete {
            ou_key: view.required_str("ouKey")?,
        },
        call => return Err(unsupported(view.object, call)),
    };
    Ok(Payload::OrgUnit(op))
}

fn body(view: &RecordView<'_>) -> Result<OrgUnit, RecordError> {
    let parent = view.str("parentOrgUnitPath")?;
    if let Some(path) = &parent
        && !path.starts_with('/')
    {
        return Err(RecordError::Malformed(format!(
            "parentOrgUnitPath '{path}' must start with '/'"
        )));
    }
    Ok(OrgUnit {
        name: view.str("name")?,
        description: view.str("description")?,
        parent_org_unit_path: parent,
        block_inheritance: view.bool("blockInheritance")?,
    })
}
