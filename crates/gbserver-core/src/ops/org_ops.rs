//! Organization and user registration
//!
//! Organizations and users are only created while seeding the store.

use super::store::Store;
use crate::errors::{GbError, Result};
use crate::model::{Organization, User, UserKey};
use crate::rules::validation::name_defect;

/// Register a new, empty organization
///
/// # Errors
///
/// Returns `Seed` if the name is empty or contains `/`, or an organization
/// with this name already exists.
pub fn create_organization(store: &mut Store, id: u64, name: &str) -> Result<()> {
    if let Some(reason) = name_defect(name) {
        return Err(GbError::Seed {
            reason: format!("organization {:?}: {}", name, reason),
        });
    }
    if store.get_organization(name).is_ok() {
        return Err(GbError::Seed {
            reason: format!("duplicate organization {}", name),
        });
    }
    store.insert_organization(Organization::new(id, name));
    tracing::debug!(org = name, id, "Registered organization");
    Ok(())
}

/// Register a user under an organization and add them as a member
///
/// # Errors
///
/// Returns `OrganizationNotFound` if the organization is missing, or `Seed`
/// if the login is malformed or already registered under it.
pub fn add_user(store: &mut Store, org: &str, user: User) -> Result<UserKey> {
    if let Some(reason) = name_defect(&user.login) {
        return Err(GbError::Seed {
            reason: format!("login {:?}: {}", user.login, reason),
        });
    }
    let key = UserKey::new(org, user.login.clone());
    if store.get_user(&key).is_ok() {
        return Err(GbError::Seed {
            reason: format!("duplicate user {}", key),
        });
    }

    store.get_organization_mut(org)?.add_member(user.login.clone());
    store.insert_user(key.clone(), user);
    tracing::debug!(user = %key, "Registered user");
    Ok(key)
}
