//! Seed importer
//!
//! Replays a validated seed through the same ops the service uses, so the
//! resulting store satisfies every store invariant.

use crate::errors::Result;
use crate::model::{RepoKey, User};
use crate::ops::{branch_ops, org_ops, pull_ops, repo_ops, NewPullRequest, PullRequestUpdate, Store};
use crate::seed::format_v0::{SeedRepository, SeedV0};
use crate::seed::parser::{parse_seed_str, seed_error};

/// Built-in default fixture
pub const DEFAULT_SEED: &str = include_str!("../../seeds/default.yaml");

/// Import a parsed seed into `store`
///
/// Any failure is reported as `Seed`. The store may be partially populated
/// on failure; build into a fresh store when that matters.
///
/// # Errors
///
/// Returns `Seed` naming the entity that could not be imported.
pub fn import_seed(store: &mut Store, seed: &SeedV0) -> Result<()> {
    for org in &seed.organizations {
        org_ops::create_organization(store, org.id, &org.name)?;
        for user in &org.users {
            let mut entity = User::new(user.id, user.login.clone(), user.node_id.clone());
            entity.user_type = user.user_type.clone();
            org_ops::add_user(store, &org.name, entity)?;
        }
    }

    for repo in &seed.repositories {
        import_repository(store, repo)?;
    }

    tracing::debug!(
        organizations = seed.organizations.len(),
        repositories = seed.repositories.len(),
        "Imported seed"
    );
    Ok(())
}

fn import_repository(store: &mut Store, seed: &SeedRepository) -> Result<()> {
    let key = RepoKey::new(seed.org.clone(), seed.owner.clone(), seed.name.clone());
    let context = |e: crate::errors::GbError| seed_error(format!("repository {}: {}", key, e));

    repo_ops::create_repository(store, &key, &seed.description).map_err(context)?;
    if let Some(node_id) = &seed.node_id {
        store.get_repository_mut(&key).map_err(context)?.node_id = node_id.clone();
    }

    for branch in &seed.branches {
        let reference = format!("refs/heads/{}", branch.name);
        let branch_key =
            branch_ops::create_branch(store, &key, &reference, &branch.sha).map_err(context)?;
        store.get_branch_mut(&branch_key).map_err(context)?.protected = branch.protected;
    }

    for pr in &seed.pull_requests {
        let request = NewPullRequest {
            title: pr.title.clone(),
            body: pr.body.clone(),
            head: pr.head.clone(),
            base: pr.base.clone(),
        };
        let id = pull_ops::create_pull_request(store, &key, &request).map_err(context)?;
        if pr.state != "open" {
            let update = PullRequestUpdate {
                state: pr.state.clone(),
                ..Default::default()
            };
            pull_ops::update_pull_request(store, &key, &id, &update).map_err(context)?;
        }
    }

    Ok(())
}

/// Build a fresh store from a seed
///
/// # Errors
///
/// Returns `Seed` if any entity fails to import.
pub fn build_store(base_url: &str, seed: &SeedV0) -> Result<Store> {
    let mut store = Store::with_base_url(base_url);
    import_seed(&mut store, seed)?;
    Ok(store)
}

/// Build a store holding the built-in default fixture
///
/// # Errors
///
/// Returns `Seed` if the embedded fixture fails to parse or import.
pub fn load_default_seed(base_url: &str) -> Result<Store> {
    let seed = parse_seed_str(DEFAULT_SEED)?;
    build_store(base_url, &seed)
}
