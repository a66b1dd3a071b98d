use std::collections::HashMap;

/// One remote Iterable list configuration grouped under a client.
///
/// A project whose `api_key` or `list_id` is unset is inert: it is
/// skipped during consolidation and contributes zero records. That is
/// valid configuration, not an error.
#[derive(Debug, Clone)]
pub struct ProjectDescriptor {
    /// Display name, e.g. "Whatley for Senate". The client's pretty
    /// name is derived from the first project's name.
    pub name: String,
    pub api_key: Option<String>,
    pub list_id: Option<String>,
}

impl ProjectDescriptor {
    /// Returns the credential pair, or `None` if the project is inert.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.api_key.as_deref(), self.list_id.as_deref()) {
            (Some(key), Some(list)) => Some((key, list)),
            _ => None,
        }
    }
}

/// Static mapping from client identifier to its ordered project list.
///
/// Built once at process start and shared read-only for the process
/// lifetime. The engine never mutates it.
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: HashMap<String, Vec<ProjectDescriptor>>,
}

/// Client map mirrored from the campaign roster: client id, then one
/// (project name, API-key env var, list-id env var) triple per project.
const CLIENT_PROJECTS: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "johnson",
        &[
            ("Mike Johnson for Louisiana", "MJ_LA_API_KEY", "MJ_LA_LIST_ID"),
            ("Mike Johnson for Louisiana NY", "MJ_NY_API_KEY", "MJ_NY_LIST_ID"),
        ],
    ),
    (
        "whatley",
        &[("Whatley for Senate", "WHATLEY_API_KEY", "WHATLEY_LIST_ID")],
    ),
    (
        "britt",
        &[("Britt for Alabama", "BRITT_API_KEY", "BRITT_LIST_ID")],
    ),
    (
        "rogers",
        &[("Rogers for Senate", "ROGERS_API_KEY", "ROGERS_LIST_ID")],
    ),
    (
        "hilton",
        &[("Steve Hilton for Governor 2026", "HILTON_API_KEY", "HILTON_LIST_ID")],
    ),
];

/// Reads an optional credential variable, treating empty/whitespace
/// values the same as unset.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl ClientRegistry {
    /// Builds the registry from the static client map, reading each
    /// project's credential pair from the environment. Partially or
    /// fully unset pairs produce inert projects, never a failure.
    pub fn from_env() -> Self {
        let mut clients = HashMap::new();
        for (client_id, projects) in CLIENT_PROJECTS {
            let descriptors: Vec<ProjectDescriptor> = projects
                .iter()
                .map(|(name, key_var, list_var)| {
                    let descriptor = ProjectDescriptor {
                        name: name.to_string(),
                        api_key: optional_env(key_var),
                        list_id: optional_env(list_var),
                    };
                    if descriptor.credentials().is_none() {
                        tracing::debug!(
                            "Project '{}' has no credentials configured, will be skipped",
                            name
                        );
                    }
                    descriptor
                })
                .collect();
            clients.insert(client_id.to_string(), descriptors);
        }
        tracing::info!("Client registry built with {} clients", clients.len());
        Self { clients }
    }

    /// Builds a registry from explicit entries. Used by tests.
    #[allow(dead_code)]
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, Vec<ProjectDescriptor>)>,
    ) -> Self {
        Self {
            clients: entries.into_iter().collect(),
        }
    }

    /// Looks up a client's projects. Unknown ids yield an empty slice,
    /// which callers must treat as a precondition failure.
    pub fn lookup(&self, client_id: &str) -> &[ProjectDescriptor] {
        self.clients
            .get(client_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Pretty client name: the first project's display name up to the
    /// `" for "` separator, or the whole name when absent. `None` for
    /// unknown clients.
    pub fn client_name(&self, client_id: &str) -> Option<String> {
        let first = self.lookup(client_id).first()?;
        Some(
            first
                .name
                .split(" for ")
                .next()
                .unwrap_or(&first.name)
                .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, key: Option<&str>, list: Option<&str>) -> ProjectDescriptor {
        ProjectDescriptor {
            name: name.to_string(),
            api_key: key.map(String::from),
            list_id: list.map(String::from),
        }
    }

    #[test]
    fn test_lookup_unknown_client_is_empty() {
        let registry = ClientRegistry::from_entries(vec![]);
        assert!(registry.lookup("nobody").is_empty());
        assert!(registry.client_name("nobody").is_none());
    }

    #[test]
    fn test_client_name_strips_for_suffix() {
        let registry = ClientRegistry::from_entries(vec![(
            "whatley".to_string(),
            vec![project("Whatley for Senate", Some("k"), Some("1"))],
        )]);
        assert_eq!(registry.client_name("whatley").unwrap(), "Whatley");
    }

    #[test]
    fn test_client_name_without_separator_is_whole_name() {
        let registry = ClientRegistry::from_entries(vec![(
            "acme".to_string(),
            vec![project("Acme 2026", Some("k"), Some("1"))],
        )]);
        assert_eq!(registry.client_name("acme").unwrap(), "Acme 2026");
    }

    #[test]
    fn test_client_name_uses_first_project() {
        let registry = ClientRegistry::from_entries(vec![(
            "johnson".to_string(),
            vec![
                project("Mike Johnson for Louisiana", None, None),
                project("Mike Johnson for Louisiana NY", Some("k"), Some("2")),
            ],
        )]);
        assert_eq!(registry.client_name("johnson").unwrap(), "Mike Johnson");
    }

    #[test]
    fn test_partial_credentials_are_inert() {
        let p = project("Britt for Alabama", Some("key"), None);
        assert!(p.credentials().is_none());
        let p = project("Britt for Alabama", Some("key"), Some("42"));
        assert_eq!(p.credentials(), Some(("key", "42")));
    }
}
