//! Typed operation payloads.
//!
//! A `Payload` is produced only by the record builders, so every variant is
//! already validated: enumerations are canonical, passwords are hashed and
//! the natural key is present.

use std::borrow::Cow;

use super::objects::{
    ChromeOsAction, ChromeOsDevice, DeprovisionReason, Group, GroupSettings, Member, MobileAction,
    OrgUnit, User,
};
use super::{CallType, ObjectType};

/// A validated operation, tagged by object type and then by call type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    User(UserOp),
    Group(GroupOp),
    Member(MemberOp),
    OrgUnit(OrgUnitOp),
    ChromeOsDevice(ChromeOsOp),
    MobileDevice(MobileOp),
    GroupSettings(GroupSettingsOp),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserOp {
    Create(User),
    Update {
        user_key: String,
        body: User,
    },
    Delete {
        user_key: String,
    },
    Undelete {
        user_key: String,
        org_unit_path: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupOp {
    Create(Group),
    Update { group_key: String, body: Group },
    Delete { group_key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberOp {
    Create {
        group_key: String,
        member: Member,
    },
    Update {
        group_key: String,
        member_key: String,
        body: Member,
    },
    Delete {
        group_key: String,
        member_key: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrgUnitOp {
    Create(OrgUnit),
    Update { ou_key: String, body: OrgUnit },
    Delete { ou_key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChromeOsOp {
    Update {
        device_id: String,
        body: ChromeOsDevice,
    },
    Manage {
        device_id: String,
        action: ChromeOsAction,
        reason: Option<DeprovisionReason>,
    },
    Move {
        device_id: String,
        org_unit_path: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MobileOp {
    Manage {
        resource_id: String,
        action: MobileAction,
    },
    Delete {
        resource_id: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum GroupSettingsOp {
    Manage {
        group_key: String,
        settings: GroupSettings,
    },
}

impl Payload {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Payload::User(_) => ObjectType::User,
            Payload::Group(_) => ObjectType::Group,
            Payload::Member(_) => ObjectType::Member,
            Payload::OrgUnit(_) => ObjectType::OrgUnit,
            Payload::ChromeOsDevice(_) => ObjectType::ChromeOsDevice,
            Payload::MobileDevice(_) => ObjectType::MobileDevice,
            Payload::GroupSettings(_) => ObjectType::GroupSettings,
        }
    }

    pub fn call_type(&self) -> CallType {
        match self {
            Payload::User(UserOp::Create(_))
            | Payload::Group(GroupOp::Create(_))
            | Payload::Member(MemberOp::Create { .. })
            | Payload::OrgUnit(OrgUnitOp::Create(_)) => CallType::Create,

            Payload::User(UserOp::Update { .. })
            | Payload::Group(GroupOp::Update { .. })
            | Payload::Member(MemberOp::Update { .. })
            | Payload::OrgUnit(OrgUnitOp::Update { .. })
            | Payload::ChromeOsDevice(ChromeOsOp::Update { .. }) => CallType::Update,

            Payload::User(UserOp::Delete { .. })
            | Payload::Group(GroupOp::Delete { .. })
            | Payload::Member(MemberOp::Delete { .. })
            | Payload::OrgUnit(OrgUnitOp::Delete { .. })
            | Payload::MobileDevice(MobileOp::Delete { .. }) => CallType::Delete,

            Payload::ChromeOsDevice(ChromeOsOp::Manage { .. })
            | Payload::MobileDevice(MobileOp::Manage { .. })
            | Payload::GroupSettings(GroupSettingsOp::Manage { .. }) => CallType::Manage,

            Payload::ChromeOsDevice(ChromeOsOp::Move { .. }) => CallType::Move,

            Payload::User(UserOp::Undelete { .. }) => CallType::Undelete,
        }
    }

    /// The caller-visible identifier of the target object.
    ///
    /// Empty when the builder could not establish one; the dispatcher refuses
    /// to submit such payloads.
    pub fn natural_key(&self) -> Cow<'_, str> {
        let key: &str = match self {
            Payload::User(UserOp::Create(user)) => user.primary_email.as_deref().unwrap_or(""),
            Payload::User(
                UserOp::Update { user_key, .. }
                | UserOp::Delete { user_key }
                | UserOp::Undelete { user_key, .. },
            ) => user_key,

            Payload::Group(GroupOp::Create(group)) => group.email.as_deref().unwrap_or(""),
            Payload::Group(GroupOp::Update { group_key, .. } | GroupOp::Delete { group_key }) => {
                group_key
            }

            Payload::Member(MemberOp::Create { member, .. }) => {
                member.email.as_deref().unwrap_or("")
            }
            Payload::Member(
                MemberOp::Update { member_key, .. } | MemberOp::Delete { member_key, .. },
            ) => member_key,

            Payload::OrgUnit(OrgUnitOp::Create(ou)) => {
                return ou.path().map(Cow::Owned).unwrap_or(Cow::Borrowed(""));
            }
            Payload::OrgUnit(OrgUnitOp::Update { ou_key, .. } | OrgUnitOp::Delete { ou_key }) => {
                ou_key
            }

            Payload::ChromeOsDevice(
                ChromeOsOp::Update { device_id, .. }
                | ChromeOsOp::Manage { device_id, .. }
                | ChromeOsOp::Move { device_id, .. },
            ) => device_id,

            Payload::MobileDevice(
                MobileOp::Manage { resource_id, .. } | MobileOp::Delete { resource_id },
            ) => resource_id,

            Payload::GroupSettings(GroupSettingsOp::Manage { group_key, .. }) => group_key,
        };
        Cow::Borrowed(key)
    }

    /// Extra identifiers shown after the natural key in report lines.
    pub fn context(&self) -> Option<String> {
        match self {
            Payload::Member(
                MemberOp::Create { group_key, .. }
                | MemberOp::Update { group_key, .. }
                | MemberOp::Delete { group_key, .. },
            ) => Some(format!("in group {group_key}")),
            Payload::ChromeOsDevice(ChromeOsOp::Manage { action, .. }) => {
                Some(format!("with action {action}"))
            }
            Payload::ChromeOsDevice(ChromeOsOp::Move { org_unit_path, .. }) => {
                Some(format!("to {org_unit_path}"))
            }
            Payload::MobileDevice(MobileOp::Manage { action, .. }) => {
                Some(format!("with action {action}"))
            }
            Payload::User(UserOp::Undelete {
                org_unit_path: Some(path),
                ..
            }) => Some(format!("into {path}")),
            _ => None,
        }
    }
}
