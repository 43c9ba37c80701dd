use super::{RecordView, ensure_changes, unsupported};
use crate::error::RecordError;
use crate::model::{CallType, GroupSettings, GroupSettingsOp, Payload};

/// Every attribute other than the key is a setting; enumerated ones are
/// canonicalized and all values travel as strings.
pub(super) fn build(view: &RecordView<'_>) -> Result<Payload, RecordError> {
    view.check_required()?;
    if view.call != CallType::Manage {
        return Err(unsupported(view.object, view.call));
    }
    let group_key = view.required_str("groupKey")?;

    let mut settings = GroupSettings::default();
    for (name, _) in view.record.iter() {
        if name == "groupKey" {
            continue;
        }
        if let Some(value) = view.enumerated(name)? {
            settings.settings.insert(name.to_string(), value);
        } else if let Some(value) = view.str(name)? {
            settings.settings.insert(name.to_string(), value);
        }
    }
    ensure_changes(!settings.is_empty())?;

    Ok(Payload::GroupSettings(GroupSettingsOp::Manage {
        group_key,
        settings,
    }))
}
