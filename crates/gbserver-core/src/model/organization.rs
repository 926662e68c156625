use serde::{Deserialize, Serialize};

/// Organization - the top-level namespace
///
/// Owns a list of member logins and the names of the repositories created
/// under it. `repository_counter` only ever grows and feeds repository IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub name: String,
    /// Member logins
    pub members: Vec<String>,
    /// Repository names, one entry per live repository
    pub repositories: Vec<String>,
    pub repository_counter: u64,
}

impl Organization {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            members: Vec::new(),
            repositories: Vec::new(),
            repository_counter: 0,
        }
    }

    pub fn is_member(&self, login: &str) -> bool {
        self.members.iter().any(|m| m == login)
    }

    pub fn add_member(&mut self, login: impl Into<String>) {
        let login = login.into();
        if !self.is_member(&login) {
            self.members.push(login);
        }
    }

    pub fn add_repository(&mut self, name: impl Into<String>) {
        self.repositories.push(name.into());
    }

    /// Remove a single occurrence of `name`
    ///
    /// Two owners may each hold a repository of the same name, so only one
    /// entry is dropped per deletion.
    pub fn remove_repository(&mut self, name: &str) -> bool {
        match self.repositories.iter().position(|r| r == name) {
            Some(idx) => {
                self.repositories.remove(idx);
                true
            }
            None => false,
        }
    }
}
