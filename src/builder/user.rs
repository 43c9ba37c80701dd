use super::{RecordView, ensure_changes, unsupported};
use crate::error::RecordError;
use crate::model::{CallType, HASH_FUNCTION, Payload, User, UserName, UserOp};

pub(super) fn build(view: &RecordView<'_>) -> Result<Payload, RecordError> {
    view.check_required()?;
    let op = match view.call {
        CallType::Create => UserOp::Create(body(view)?),
        CallType::Update => {
            let user_key = view.required_str("userKey")?;
            let body = body(view)?;
            ensure_changes(body != User::default())?;
            UserOp::Update { user_key, body }
        }
        CallType::Delete => UserOp::Delete {
            user_key: view.required_str("userKey")?,
        },
        CallType::Undelete => UserOp::Undelete {
            user_key: view.required_str("userKey")?,
            org_unit_path: view.str("orgUnitPath")?.filter(|p| !p.is_empty()),
        },
        call => return Err(unsupported(view.object, call)),
    };
    Ok(Payload::User(op))
}

fn body(view: &RecordView<'_>) -> Result<User, RecordError> {
    let name = UserName {
        given_name: view.str("givenName")?,
        family_name: view.str("familyName")?,
        full_name: view.str("fullName")?,
    };
    let password = view.password_digest("password")?;
    let hash_function = password.as_ref().map(|_| HASH_FUNCTION.to_string());

    Ok(User {
        primary_email: view.email("primaryEmail")?,
        name: (!name.is_empty()).then_some(name),
        password,
        hash_function,
        org_unit_path: view.str("orgUnitPath")?,
        recovery_email: view.email("recoveryEmail")?,
        recovery_phone: view.phone("recoveryPhone")?,
        suspended: view.bool("suspended")?,
        change_password_at_next_login: view.bool("changePasswordAtNextLogin")?,
        include_in_global_address_list: view.bool("includeInGlobalAddressList")?,
        ip_whitelisted: view.bool("ipWhitelisted")?,
        archived: view.bool("archived")?,
        composites: view.composites(),
    })
}
