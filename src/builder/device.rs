use super::{RecordView, ensure_changes, unsupported};
use crate::error::RecordError;
use crate::model::{
    CallType, ChromeOsAction, ChromeOsDevice, ChromeOsOp, DeprovisionReason, MobileAction,
    MobileOp, Payload,
};

pub(super) fn build_chromeos(view: &RecordView<'_>) -> Result<Payload, RecordError> {
    view.check_required()?;
    let device_id = view.required_str("deviceId")?;
    let op = match view.call {
        CallType::Update => {
            let body = ChromeOsDevice {
                annotated_asset_id: view.str("annotatedAssetId")?,
                annotated_location: view.str("annotatedLocation")?,
                annotated_user: view.str("annotatedUser")?,
                notes: view.str("notes")?,
                org_unit_path: view.str("orgUnitPath")?,
            };
            ensure_changes(body != ChromeOsDevice::default())?;
            ChromeOsOp::Update { device_id, body }
        }
        CallType::Manage => {
            let action = chromeos_action(view)?;
            let reason = deprovision_reason(view, action)?;
            ChromeOsOp::Manage {
                device_id,
                action,
                reason,
            }
        }
        CallType::Move => ChromeOsOp::Move {
            device_id,
            org_unit_path: view.required_str("orgUnitPath")?,
        },
        call => return Err(unsupported(view.object, call)),
    };
    Ok(Payload::ChromeOsDevice(op))
}

fn chromeos_action(view: &RecordView<'_>) -> Result<ChromeOsAction, RecordError> {
    let token = view.enumerated("action")?.unwrap_or_default();
    ChromeOsAction::from_str(&token).ok_or_else(|| RecordError::MissingRequiredField {
        field: "action".to_string(),
    })
}

/// A reason is mandatory for deprovisioning and ignored otherwise.
fn deprovision_reason(
    view: &RecordView<'_>,
    action: ChromeOsAction,
) -> Result<Option<DeprovisionReason>, RecordError> {
    let token = view.enumerated("deprovisionReason")?;
    if action != ChromeOsAction::Deprovision {
        return Ok(None);
    }
    token
        .as_deref()
        .and_then(DeprovisionReason::from_str)
        .map(Some)
        .ok_or_else(|| RecordError::MissingRequiredField {
            field: "deprovisionReason".to_string(),
        })
}

pub(super) fn build_mobile(view: &RecordView<'_>) -> Result<Payload, RecordError> {
    view.check_required()?;
    let resource_id = view.required_str("resourceId")?;
    let op = match view.call {
        CallType::Manage => {
            let token = view.enumerated("action")?.unwrap_or_default();
            let action =
                MobileAction::from_str(&token).ok_or_else(|| RecordError::MissingRequiredField {
                    field: "action".to_string(),
                })?;
            MobileOp::Manage {
                resource_id,
                action,
            }
        }
        CallType::Delete => MobileOp::Delete { resource_id },
        call => return Err(unsupported(view.object, call)),
    };
    Ok(Payload::MobileDevice(op))
}
