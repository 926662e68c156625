//! Seed parser with validation
//!
//! Parses YAML and validates schema version, key uniqueness and owner references

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::{GbError, Result};
use crate::rules::validation::name_defect;
use crate::seed::format_v0::SeedV0;

/// Parse a seed file from a path
///
/// # Errors
///
/// Returns `Seed` if the file cannot be read, is not valid YAML, or fails validation.
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path).map_err(|e| {
        seed_error(format!(
            "Failed to read seed file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_seed_str(&content)
}

/// Parse a seed from a string
///
/// # Errors
///
/// Returns `Seed` if the content is not valid YAML or fails validation.
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_error(format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_error(format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let mut org_names = HashSet::new();
    let mut logins = HashSet::new();
    let mut members = HashSet::new();
    for org in &seed.organizations {
        if let Some(reason) = name_defect(&org.name) {
            return Err(seed_error(format!("Organization {:?}: {}", org.name, reason)));
        }
        if !org_names.insert(org.name.as_str()) {
            return Err(seed_error(format!("Duplicate organization {}", org.name)));
        }
        for user in &org.users {
            if let Some(reason) = name_defect(&user.login) {
                return Err(seed_error(format!("User login {:?}: {}", user.login, reason)));
            }
            // Logins are globally unique so that an owner name identifies one user
            if !logins.insert(user.login.as_str()) {
                return Err(seed_error(format!("Duplicate user login {}", user.login)));
            }
            members.insert((org.name.as_str(), user.login.as_str()));
        }
    }

    let mut repo_keys = HashSet::new();
    for repo in &seed.repositories {
        if !members.contains(&(repo.org.as_str(), repo.owner.as_str())) {
            return Err(seed_error(format!(
                "Repository {} references unknown owner {}/{}",
                repo.name, repo.org, repo.owner
            )));
        }
        if !repo_keys.insert((repo.org.as_str(), repo.owner.as_str(), repo.name.as_str())) {
            return Err(seed_error(format!(
                "Duplicate repository {}/{}/{}",
                repo.org, repo.owner, repo.name
            )));
        }
    }

    Ok(())
}

pub(crate) fn seed_error(reason: String) -> GbError {
    GbError::Seed { reason }
}
