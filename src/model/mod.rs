//! Directory object model.
//!
//! This module provides:
//! - `ObjectType` and `CallType`: the two axes every batch operation is keyed on
//! - Typed wire objects (`User`, `Group`, `Member`, ...) serialized with the
//!   directory's canonical camelCase attribute names
//! - `Payload`: the validated, tagged operation handed to the dispatcher

mod objects;
mod payload;

pub use objects::{
    ChromeOsAction, ChromeOsDevice, DeprovisionReason, Group, GroupSettings, HASH_FUNCTION,
    Member, MobileAction, OrgUnit, User, UserName,
};
pub use payload::{
    ChromeOsOp, GroupOp, GroupSettingsOp, MemberOp, MobileOp, OrgUnitOp, Payload, UserOp,
};

use std::fmt;

/// The kind of directory object a batch operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    User,
    Group,
    Member,
    OrgUnit,
    ChromeOsDevice,
    MobileDevice,
    Schema,
    GroupSettings,
}

impl ObjectType {
    /// All object types, in catalog order.
    pub const ALL: [ObjectType; 8] = [
        ObjectType::User,
        ObjectType::Group,
        ObjectType::Member,
        ObjectType::OrgUnit,
        ObjectType::ChromeOsDevice,
        ObjectType::MobileDevice,
        ObjectType::Schema,
        ObjectType::GroupSettings,
    ];

    /// Operator-facing noun used in report lines.
    pub fn noun(&self) -> &'static str {
        match self {
            ObjectType::User => "user",
            ObjectType::Group => "group",
            ObjectType::Member => "member",
            ObjectType::OrgUnit => "orgunit",
            ObjectType::ChromeOsDevice => "chromeos device",
            ObjectType::MobileDevice => "mobile device",
            ObjectType::Schema => "schema",
            ObjectType::GroupSettings => "group settings",
        }
    }

    /// Whether calls for this object type are scoped by the customer id.
    pub fn needs_customer_id(&self) -> bool {
        matches!(
            self,
            ObjectType::OrgUnit
                | ObjectType::ChromeOsDevice
                | ObjectType::MobileDevice
                | ObjectType::Schema
        )
    }

    /// Parse an object type from a config or CLI token.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "user" | "users" => Some(ObjectType::User),
            "group" | "groups" => Some(ObjectType::Group),
            "member" | "members" | "groupmember" | "groupmembers" => Some(ObjectType::Member),
            "orgunit" | "orgunits" | "ou" => Some(ObjectType::OrgUnit),
            "chromeosdevice" | "chromeosdevices" | "crosdev" => Some(ObjectType::ChromeOsDevice),
            "mobiledevice" | "mobiledevices" | "mobdev" => Some(ObjectType::MobileDevice),
            "schema" | "schemas" => Some(ObjectType::Schema),
            "groupsettings" | "groupsetting" => Some(ObjectType::GroupSettings),
            _ => None,
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// The operation a batch performs on each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CallType {
    Create,
    Update,
    Delete,
    Move,
    Manage,
    Undelete,
}

impl CallType {
    /// Whether records for this call carry only a natural key.
    pub fn is_key_only(&self) -> bool {
        matches!(self, CallType::Delete)
    }

    /// Past-tense verb used in success lines.
    pub fn past_tense(&self) -> &'static str {
        match self {
            CallType::Create => "created",
            CallType::Update => "updated",
            CallType::Delete => "deleted",
            CallType::Move => "moved",
            CallType::Manage => "managed",
            CallType::Undelete => "undeleted",
        }
    }

    /// Parse a call type from a config token.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Some(CallType::Create),
            "update" => Some(CallType::Update),
            "delete" => Some(CallType::Delete),
            "move" => Some(CallType::Move),
            "manage" => Some(CallType::Manage),
            "undelete" => Some(CallType::Undelete),
            _ => None,
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallType::Create => write!(f, "create"),
            CallType::Update => write!(f, "update"),
            CallType::Delete => write!(f, "delete"),
            CallType::Move => write!(f, "move"),
            CallType::Manage => write!(f, "manage"),
            CallType::Undelete => write!(f, "undelete"),
        }
    }
}
