//! Wire representations of directory objects.
//!
//! Every field is optional so the same struct serves as a create body and as
//! a partial update body; absent fields are never serialized.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Hash-function token the directory accepts alongside a pre-hashed password.
pub const HASH_FUNCTION: &str = "SHA-1";

/// A directory user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<UserName>,
    /// Always a SHA-1 hex digest, never plaintext.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_unit_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_password_at_next_login: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_in_global_address_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_whitelisted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// Composite attributes passed through verbatim (addresses, phones, ...).
    #[serde(flatten)]
    pub composites: Map<String, Value>,
}

/// The structured name of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl UserName {
    pub fn is_empty(&self) -> bool {
        self.given_name.is_none() && self.family_name.is_none() && self.full_name.is_none()
    }
}

/// A directory group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A group membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_settings: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub member_type: Option<String>,
}

/// An organizational unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgUnit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_org_unit_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_inheritance: Option<bool>,
}

impl OrgUnit {
    /// Full path of the unit once created, e.g. `/Sales/East`.
    pub fn path(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        let parent = self.parent_org_unit_path.as_deref().unwrap_or("/");
        let parent = parent.trim_end_matches('/');
        Some(format!("{parent}/{name}"))
    }
}

/// Mutable annotations of a Chrome OS device.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChromeOsDevice {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotated_asset_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotated_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotated_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_unit_path: Option<String>,
}

/// Group settings keyed by canonical setting name.
///
/// The settings service transmits every value as a string, booleans included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupSettings {
    pub settings: BTreeMap<String, String>,
}

impl GroupSettings {
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

/// Actions accepted by the Chrome OS device action endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromeOsAction {
    Deprovision,
    Disable,
    Reenable,
    PreProvisionedDisable,
    PreProvisionedReenable,
}

impl ChromeOsAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChromeOsAction::Deprovision => "deprovision",
            ChromeOsAction::Disable => "disable",
            ChromeOsAction::Reenable => "reenable",
            ChromeOsAction::PreProvisionedDisable => "pre_provisioned_disable",
            ChromeOsAction::PreProvisionedReenable => "pre_provisioned_reenable",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "deprovision" => Some(ChromeOsAction::Deprovision),
            "disable" => Some(ChromeOsAction::Disable),
            "reenable" => Some(ChromeOsAction::Reenable),
            "pre_provisioned_disable" => Some(ChromeOsAction::PreProvisionedDisable),
            "pre_provisioned_reenable" => Some(ChromeOsAction::PreProvisionedReenable),
            _ => None,
        }
    }
}

impl fmt::Display for ChromeOsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason recorded when a Chrome OS device is deprovisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeprovisionReason {
    DifferentModelReplacement,
    RetiringDevice,
    SameModelReplacement,
    UpgradeTransfer,
}

impl DeprovisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeprovisionReason::DifferentModelReplacement => "different_model_replacement",
            DeprovisionReason::RetiringDevice => "retiring_device",
            DeprovisionReason::SameModelReplacement => "same_model_replacement",
            DeprovisionReason::UpgradeTransfer => "upgrade_transfer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "different_model_replacement" => Some(DeprovisionReason::DifferentModelReplacement),
            "retiring_device" => Some(DeprovisionReason::RetiringDevice),
            "same_model_replacement" => Some(DeprovisionReason::SameModelReplacement),
            "upgrade_transfer" => Some(DeprovisionReason::UpgradeTransfer),
            _ => None,
        }
    }
}

/// Actions accepted by the mobile device action endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MobileAction {
    AdminRemoteWipe,
    AdminAccountWipe,
    Approve,
    Block,
    CancelRemoteWipeThenActivate,
    CancelRemoteWipeThenBlock,
}

impl MobileAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MobileAction::AdminRemoteWipe => "admin_remote_wipe",
            MobileAction::AdminAccountWipe => "admin_account_wipe",
            MobileAction::Approve => "approve",
            MobileAction::Block => "block",
            MobileAction::CancelRemoteWipeThenActivate => "cancel_remote_wipe_then_activate",
            MobileAction::CancelRemoteWipeThenBlock => "cancel_remote_wipe_then_block",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "admin_remote_wipe" => Some(MobileAction::AdminRemoteWipe),
            "admin_account_wipe" => Some(MobileAction::AdminAccountWipe),
            "approve" => Some(MobileAction::Approve),
            "block" => Some(MobileAction::Block),
            "cancel_remote_wipe_then_activate" => Some(MobileAction::CancelRemoteWipeThenActivate),
            "cancel_remote_wipe_then_block" => Some(MobileAction::CancelRemoteWipeThenBlock),
            _ => None,
        }
    }
}

impl fmt::Display for MobileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
