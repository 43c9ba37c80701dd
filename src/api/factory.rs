//! Payload to call-handle mapping.

use serde::Serialize;
use serde_json::{Value, json};

use super::{CallHandle, Method, Service};
use crate::error::RecordError;
use crate::model::{
    ChromeOsOp, GroupOp, GroupSettingsOp, MemberOp, MobileOp, OrgUnitOp, Payload, UserOp,
};

/// Builds call handles; customer-scoped calls use the configured customer id.
#[derive(Debug, Clone)]
pub struct CallFactory {
    customer_id: String,
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, RecordError> {
    serde_json::to_value(value).map_err(|e| RecordError::Malformed(e.to_string()))
}

impl CallFactory {
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    fn directory(method: Method) -> CallHandle {
        CallHandle::new(Service::Directory, method)
    }

    fn customer(&self, method: Method) -> CallHandle {
        Self::directory(method)
            .segment("customer")
            .segment(&self.customer_id)
    }

    pub fn handle(&self, payload: &Payload) -> Result<CallHandle, RecordError> {
        let call = match payload {
            Payload::User(op) => match op {
                UserOp::Create(user) => Self::directory(Method::Post)
                    .segment("users")
                    .body(to_body(user)?),
                UserOp::Update { user_key, body } => Self::directory(Method::Put)
                    .segment("users")
                    .segment(user_key)
                    .body(to_body(body)?),
                UserOp::Delete { user_key } => Self::directory(Method::Delete)
                    .segment("users")
                    .segment(user_key),
                UserOp::Undelete {
                    user_key,
                    org_unit_path,
                } => Self::directory(Method::Post)
                    .segment("users")
                    .segment(user_key)
                    .segment("undelete")
                    .body(json!({ "orgUnitPath": org_unit_path.as_deref().unwrap_or("/") })),
            },

            Payload::Group(op) => match op {
                GroupOp::Create(group) => Self::directory(Method::Post)
                    .segment("groups")
                    .body(to_body(group)?),
                GroupOp::Update { group_key, body } => Self::directory(Method::Put)
                    .segment("groups")
                    .segment(group_key)
                    .body(to_body(body)?),
                GroupOp::Delete { group_key } => Self::directory(Method::Delete)
                    .segment("groups")
                    .segment(group_key),
            },

            Payload::Member(op) => match op {
                MemberOp::Create { group_key, member } => Self::directory(Method::Post)
                    .segment("groups")
                    .segment(group_key)
                    .segment("members")
                    .body(to_body(member)?),
                MemberOp::Update {
                    group_key,
                    member_key,
                    body,
                } => Self::directory(Method::Put)
                    .segment("groups")
                    .segment(group_key)
                    .segment("members")
                    .segment(member_key)
                    .body(to_body(body)?),
                MemberOp::Delete {
                    group_key,
                    member_key,
                } => Self::directory(Method::Delete)
                    .segment("groups")
                    .segment(group_key)
                    .segment("members")
                    .segment(member_key),
            },

            Payload::OrgUnit(op) => match op {
                OrgUnitOp::Create(ou) => self
                    .customer(Method::Post)
                    .segment("orgunits")
                    .body(to_body(ou)?),
                OrgUnitOp::Update { ou_key, body } => self
                    .customer(Method::Put)
                    .segment("orgunits")
                    .path_segments(ou_key)
                    .body(to_body(body)?),
                OrgUnitOp::Delete { ou_key } => self
                    .customer(Method::Delete)
                    .segment("orgunits")
                    .path_segments(ou_key),
            },

            Payload::ChromeOsDevice(op) => {
                let devices = self.customer(Method::Post).segment("devices").segment("chromeos");
                match op {
                    ChromeOsOp::Update { device_id, body } => CallHandle {
                        method: Method::Put,
                        ..devices.segment(device_id).body(to_body(body)?)
                    },
                    ChromeOsOp::Manage {
                        device_id,
                        action,
                        reason,
                    } => {
                        let mut body = json!({ "action": action.as_str() });
                        if let Some(reason) = reason {
                            body["deprovisionReason"] = Value::from(reason.as_str());
                        }
                        devices.segment(device_id).segment("action").body(body)
                    }
                    ChromeOsOp::Move {
                        device_id,
                        org_unit_path,
                    } => devices
                        .segment("moveDevicesToOu")
                        .query("orgUnitPath", org_unit_path)
                        .body(json!({ "deviceIds": [device_id] })),
                }
            }

            Payload::MobileDevice(op) => match op {
                MobileOp::Manage {
                    resource_id,
                    action,
                } => self
                    .customer(Method::Post)
                    .segment("devices")
                    .segment("mobile")
                    .segment(resource_id)
                    .segment("action")
                    .body(json!({ "action": action.as_str() })),
                MobileOp::Delete { resource_id } => self
                    .customer(Method::Delete)
                    .segment("devices")
                    .segment("mobile")
                    .segment(resource_id),
            },

            Payload::GroupSettings(GroupSettingsOp::Manage {
                group_key,
                settings,
            }) => CallHandle::new(Service::GroupsSettings, Method::Patch)
                .segment("groups")
                .segment(group_key)
                .body(to_body(settings)?),
        };
        Ok(call)
    }
}
