//! Static attribute tables, one per object type.

use super::AttributeDescriptor as A;
use crate::model::{CallType, ObjectType};

const CREATE: &[CallType] = &[CallType::Create];
const MANAGE: &[CallType] = &[CallType::Manage];
const MOVE: &[CallType] = &[CallType::Move];
const UPDATE_DELETE: &[CallType] = &[CallType::Update, CallType::Delete];
const UPDATE_DELETE_UNDELETE: &[CallType] = &[CallType::Update, CallType::Delete, CallType::Undelete];
const MANAGE_DELETE: &[CallType] = &[CallType::Manage, CallType::Delete];
const UPDATE_MANAGE_MOVE: &[CallType] = &[CallType::Update, CallType::Manage, CallType::Move];

pub(super) fn descriptors(object: ObjectType) -> &'static [A] {
    match object {
        ObjectType::User => USER,
        ObjectType::Group => GROUP,
        ObjectType::Member => MEMBER,
        ObjectType::OrgUnit => ORG_UNIT,
        ObjectType::ChromeOsDevice => CHROME_OS_DEVICE,
        ObjectType::MobileDevice => MOBILE_DEVICE,
        ObjectType::Schema => SCHEMA,
        ObjectType::GroupSettings => GROUP_SETTINGS,
    }
}

pub(super) fn natural_key(object: ObjectType, call: CallType) -> Option<&'static str> {
    let key = match (object, call) {
        (ObjectType::User, CallType::Create) => "primaryEmail",
        (ObjectType::User, _) => "userKey",
        (ObjectType::Group, CallType::Create) => "email",
        (ObjectType::Group, _) => "groupKey",
        (ObjectType::Member, CallType::Create) => "email",
        (ObjectType::Member, _) => "memberKey",
        (ObjectType::OrgUnit, CallType::Create) => return None,
        (ObjectType::OrgUnit, _) => "ouKey",
        (ObjectType::ChromeOsDevice, _) => "deviceId",
        (ObjectType::MobileDevice, _) => "resourceId",
        (ObjectType::Schema, _) => "schemaKey",
        (ObjectType::GroupSettings, _) => "groupKey",
    };
    Some(key)
}

static USER: &[A] = &[
    A::new("primaryEmail")
        .aliases(&["primary_email"])
        .required(CREATE)
        .queryable(),
    A::new("userKey")
        .aliases(&["user_key", "userid"])
        .required(UPDATE_DELETE_UNDELETE),
    A::new("name").flattened(),
    A::new("givenName")
        .aliases(&["firstname", "first_name", "given_name"])
        .required(CREATE)
        .queryable(),
    A::new("familyName")
        .aliases(&["lastname", "last_name", "family_name"])
        .required(CREATE)
        .queryable(),
    A::new("fullName").aliases(&["full_name"]),
    A::new("password").required(CREATE),
    A::new("orgUnitPath")
        .aliases(&["orgunit", "org_unit_path"])
        .queryable(),
    A::new("recoveryEmail").aliases(&["recovery_email"]),
    A::new("recoveryPhone").aliases(&["recovery_phone"]),
    A::new("suspended").boolean().queryable(),
    A::new("changePasswordAtNextLogin")
        .aliases(&["changepassword"])
        .boolean(),
    A::new("includeInGlobalAddressList")
        .aliases(&["gal"])
        .boolean(),
    A::new("ipWhitelisted").boolean(),
    A::new("archived").boolean(),
    A::new("addresses").composite(),
    A::new("emails").composite(),
    A::new("externalIds").composite(),
    A::new("ims").composite(),
    A::new("keywords").composite(),
    A::new("locations").composite(),
    A::new("organizations").composite(),
    A::new("phones").composite(),
    A::new("relations").composite(),
    A::new("websites").composite(),
    A::new("customSchemas").composite(),
];

static GROUP: &[A] = &[
    A::new("email").required(CREATE).queryable(),
    A::new("groupKey")
        .aliases(&["group_key"])
        .required(UPDATE_DELETE),
    A::new("name").queryable(),
    A::new("description").allow_empty(),
];

static MEMBER: &[A] = &[
    A::new("email").required(CREATE),
    A::new("memberKey")
        .aliases(&["member_key"])
        .required(UPDATE_DELETE),
    A::new("role")
        .values(&["MANAGER", "MEMBER", "OWNER"])
        .queryable(),
    A::new("deliverySettings")
        .aliases(&["delivery", "delivery_settings"])
        .values(&["ALL_MAIL", "DAILY", "DIGEST", "DISABLED", "NONE"]),
    A::new("type")
        .aliases(&["membertype"])
        .values(&["CUSTOMER", "EXTERNAL", "GROUP", "USER"]),
];

static ORG_UNIT: &[A] = &[
    A::new("name").required(CREATE),
    A::new("ouKey").aliases(&["ou_key"]).required(UPDATE_DELETE),
    A::new("parentOrgUnitPath")
        .aliases(&["parentpath", "parent", "parent_org_unit_path"])
        .required(CREATE),
    A::new("description").allow_empty(),
    A::new("blockInheritance").boolean(),
];

static CHROME_OS_DEVICE: &[A] = &[
    A::new("deviceId")
        .aliases(&["device_id"])
        .required(UPDATE_MANAGE_MOVE),
    A::new("action")
        .values(&[
            "deprovision",
            "disable",
            "reenable",
            "pre_provisioned_disable",
            "pre_provisioned_reenable",
        ])
        .required(MANAGE),
    A::new("deprovisionReason")
        .aliases(&["reason", "deprovision_reason"])
        .values(&[
            "different_model_replacement",
            "retiring_device",
            "same_model_replacement",
            "upgrade_transfer",
        ]),
    A::new("annotatedAssetId")
        .aliases(&["assetid", "asset_id"])
        .allow_empty()
        .queryable(),
    A::new("annotatedLocation")
        .aliases(&["location"])
        .allow_empty()
        .queryable(),
    A::new("annotatedUser")
        .aliases(&["user"])
        .allow_empty()
        .queryable(),
    A::new("notes").allow_empty(),
    A::new("orgUnitPath")
        .aliases(&["orgunit", "org_unit_path"])
        .required(MOVE)
        .queryable(),
];

static MOBILE_DEVICE: &[A] = &[
    A::new("resourceId")
        .aliases(&["resource_id"])
        .required(MANAGE_DELETE),
    A::new("action")
        .values(&[
            "admin_remote_wipe",
            "admin_account_wipe",
            "approve",
            "block",
            "cancel_remote_wipe_then_activate",
            "cancel_remote_wipe_then_block",
        ])
        .required(MANAGE),
];

static SCHEMA: &[A] = &[
    A::new("schemaKey").aliases(&["schema_key"]),
    A::new("schemaName").aliases(&["schema_name"]).queryable(),
    A::new("displayName").aliases(&["display_name"]),
    A::new("fields").composite(),
];

const MODERATORS: &[&str] = &["ALL_MEMBERS", "OWNERS_AND_MANAGERS", "OWNERS_ONLY", "NONE"];

static GROUP_SETTINGS: &[A] = &[
    A::new("groupKey").aliases(&["group_key"]).required(MANAGE),
    A::new("whoCanJoin").values(&[
        "ANYONE_CAN_JOIN",
        "ALL_IN_DOMAIN_CAN_JOIN",
        "INVITED_CAN_JOIN",
        "CAN_REQUEST_TO_JOIN",
    ]),
    A::new("whoCanViewMembership").values(&[
        "ALL_IN_DOMAIN_CAN_VIEW",
        "ALL_MEMBERS_CAN_VIEW",
        "ALL_MANAGERS_CAN_VIEW",
        "ALL_OWNERS_CAN_VIEW",
    ]),
    A::new("whoCanViewGroup").values(&[
        "ANYONE_CAN_VIEW",
        "ALL_IN_DOMAIN_CAN_VIEW",
        "ALL_MEMBERS_CAN_VIEW",
        "ALL_MANAGERS_CAN_VIEW",
        "ALL_OWNERS_CAN_VIEW",
    ]),
    A::new("whoCanPostMessage").values(&[
        "NONE_CAN_POST",
        "ALL_MANAGERS_CAN_POST",
        "ALL_MEMBERS_CAN_POST",
        "ALL_OWNERS_CAN_POST",
        "ALL_IN_DOMAIN_CAN_POST",
        "ANYONE_CAN_POST",
    ]),
    A::new("messageModerationLevel").values(&[
        "MODERATE_ALL_MESSAGES",
        "MODERATE_NON_MEMBERS",
        "MODERATE_NEW_MEMBERS",
        "MODERATE_NONE",
    ]),
    A::new("spamModerationLevel").values(&["ALLOW", "MODERATE", "SILENTLY_MODERATE", "REJECT"]),
    A::new("replyTo").values(&[
        "REPLY_TO_CUSTOM",
        "REPLY_TO_SENDER",
        "REPLY_TO_LIST",
        "REPLY_TO_OWNER",
        "REPLY_TO_IGNORE",
        "REPLY_TO_MANAGERS",
    ]),
    A::new("whoCanContactOwner").values(&[
        "ALL_IN_DOMAIN_CAN_CONTACT",
        "ALL_MANAGERS_CAN_CONTACT",
        "ALL_MEMBERS_CAN_CONTACT",
        "ANYONE_CAN_CONTACT",
    ]),
    A::new("whoCanLeaveGroup").values(&[
        "ALL_MANAGERS_CAN_LEAVE",
        "ALL_MEMBERS_CAN_LEAVE",
        "NONE_CAN_LEAVE",
    ]),
    A::new("whoCanDiscoverGroup").values(&[
        "ANYONE_CAN_DISCOVER",
        "ALL_IN_DOMAIN_CAN_DISCOVER",
        "ALL_MEMBERS_CAN_DISCOVER",
    ]),
    A::new("whoCanModerateMembers").values(MODERATORS),
    A::new("whoCanModerateContent").values(MODERATORS),
    A::new("whoCanAssistContent").values(MODERATORS),
    A::new("allowExternalMembers").boolean(),
    A::new("allowWebPosting").boolean(),
    A::new("archiveOnly").boolean(),
    A::new("isArchived").boolean(),
    A::new("enableCollaborativeInbox").boolean(),
    A::new("includeCustomFooter").boolean(),
    A::new("includeInGlobalAddressList").boolean(),
    A::new("membersCanPostAsTheGroup").boolean(),
    A::new("sendMessageDenyNotification").boolean(),
    A::new("customFooterText").allow_empty(),
    A::new("customReplyTo").allow_empty(),
    A::new("defaultMessageDenyNotificationText").allow_empty(),
    A::new("primaryLanguage"),
];
