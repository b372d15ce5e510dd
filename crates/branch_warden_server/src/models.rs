//! Partial serde models of the GitHub `repository` webhook payload.
//!
//! GitHub sends far more fields than the workflow consumes; serde ignores
//! the rest.

use serde::Deserialize;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// The `repository` event payload.
#[derive(Debug, Deserialize)]
pub struct RepositoryEventPayload {
    /// The action within the event (`created`, `deleted`, `renamed`, ...)
    pub action: String,

    /// The repository the event concerns
    pub repository: RepositoryInfo,

    /// The organization, absent for user-owned repositories
    #[serde(default)]
    pub organization: Option<OrganizationInfo>,
}

impl RepositoryEventPayload {
    /// Resolves the organization login, falling back first to the repository
    /// owner and then to the configured organization.
    pub fn organization_login(&self, configured: &str) -> String {
        if let Some(org) = &self.organization {
            return org.login.clone();
        }
        match &self.repository.owner {
            Some(owner) => owner.login.clone(),
            None => configured.to_string(),
        }
    }
}

/// The repository block of the payload.
#[derive(Debug, Deserialize)]
pub struct RepositoryInfo {
    /// Repository name without the owner prefix
    pub name: String,

    /// Name of the default branch
    pub default_branch: String,

    /// The account owning the repository
    #[serde(default)]
    pub owner: Option<OwnerInfo>,
}

/// The repository owner block.
#[derive(Debug, Deserialize)]
pub struct OwnerInfo {
    /// Owner login
    pub login: String,
}

/// The organization block.
#[derive(Debug, Deserialize)]
pub struct OrganizationInfo {
    /// Organization login
    pub login: String,
}
