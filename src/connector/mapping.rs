//! Pure translations from upstream objects to resources.

use crate::transport::{CustomerUserAccess, GoogleAdsRow};
use crate::types::{Profile, Resource, ResourceId, ResourceTrait, UserEmail};
use crate::Error;

use super::{ACCOUNT_RESOURCE_TYPE, ROLE_RESOURCE_TYPE, USER_RESOURCE_TYPE};

/// Maps an accessible customer resource name (`customers/111`) to an account.
///
/// The resource name is both the id and the display name.
pub fn account_resource(resource_name: &str) -> Resource {
    Resource::new(&ACCOUNT_RESOURCE_TYPE, resource_name, resource_name)
}

/// Maps a user access entry to a user resource.
///
/// # Errors
///
/// Returns a [`Mapping`](crate::ErrorKind::Mapping) error when the email
/// address or the user id is missing.
pub fn user_resource(
    access: &CustomerUserAccess,
    parent: Option<&ResourceId>,
) -> Result<Resource, Error> {
    let email = access
        .email_address
        .as_deref()
        .filter(|email| !email.is_empty())
        .ok_or_else(|| Error::mapping("user access entry has no email address"))?;
    let user_id = access.user_id.ok_or_else(|| {
        Error::mapping(format!("user access entry for {} has no user id", email))
    })?;

    let profile = Profile::new()
        .with("first_name", email)
        .with("login", email)
        .with("user_id", user_id);

    Ok(Resource::new(&USER_RESOURCE_TYPE, user_id.to_string(), email)
        .with_parent(parent.cloned())
        .with_profile(profile)
        .with_trait(ResourceTrait::User {
            emails: vec![UserEmail {
                address: email.to_owned(),
                verified: true,
            }],
        }))
}

/// Maps a search row to a user resource.
///
/// # Errors
///
/// Fails like [`user_resource`], and when the row carries no user access.
pub fn user_resource_from_row(
    row: &GoogleAdsRow,
    parent: Option<&ResourceId>,
) -> Result<Resource, Error> {
    let access = row
        .customer_user_access
        .as_ref()
        .ok_or_else(|| Error::mapping("search row has no customer_user_access"))?;
    user_resource(access, parent)
}

/// Maps a catalog role to a role resource.
pub fn role_resource(key: &str, label: &str) -> Resource {
    Resource::new(&ROLE_RESOURCE_TYPE, key, label)
        .with_profile(Profile::new().with("role_name", label).with("role_id", key))
        .with_trait(ResourceTrait::Role)
}
