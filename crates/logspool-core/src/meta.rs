//! Metadata extraction from container configuration
//!
//! Derives `{project, store, name}` for a container from its labels,
//! environment, and display name. Absent keys produce empty strings;
//! extraction never fails.

use crate::types::{ContainerDetails, ContainerMeta};

/// Derives placement metadata from container configuration
#[derive(Debug, Clone)]
pub struct MetaExtractor {
    /// Label whose value selects the project bucket
    project_label: String,
    /// Environment variable whose value selects the store bucket
    store_key: String,
}

impl MetaExtractor {
    pub fn new(project_label: impl Into<String>, store_key: impl Into<String>) -> Self {
        Self {
            project_label: project_label.into(),
            store_key: store_key.into(),
        }
    }

    /// Derive `{project, store, name}` for a container
    pub fn extract(&self, container: &ContainerDetails) -> ContainerMeta {
        let project = container
            .labels
            .get(&self.project_label)
            .cloned()
            .unwrap_or_default();

        let mut store = String::new();
        for entry in &container.env {
            if let Some((key, value)) = entry.split_once('=') {
                if key == self.store_key {
                    store = value.to_lowercase();
                }
            }
        }

        ContainerMeta {
            project,
            store,
            name: container.display_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn extractor() -> MetaExtractor {
        MetaExtractor::new("com.docker.compose.project", "LOGSPOOL_STORE")
    }

    fn details(name: &str, env: &[&str], labels: &[(&str, &str)]) -> ContainerDetails {
        ContainerDetails {
            id: "c1".to_string(),
            name: name.to_string(),
            env: env.iter().map(|s| s.to_string()).collect(),
            labels: labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_extract_full() {
        let meta = extractor().extract(&details(
            "/web-1",
            &["PATH=/usr/bin", "LOGSPOOL_STORE=Orders"],
            &[("com.docker.compose.project", "shop")],
        ));
        assert_eq!(meta.project, "shop");
        assert_eq!(meta.store, "orders");
        assert_eq!(meta.name, "web-1");
    }

    #[test]
    fn test_extract_absent_keys() {
        let meta = extractor().extract(&details("/web-1", &["PATH=/usr/bin"], &[]));
        assert_eq!(meta.project, "");
        assert_eq!(meta.store, "");
        assert_eq!(meta.name, "web-1");
    }

    #[test]
    fn test_extract_store_lowercased() {
        let meta = extractor().extract(&details("/db", &["LOGSPOOL_STORE=WAREHOUSE"], &[]));
        assert_eq!(meta.store, "warehouse");
    }

    #[test]
    fn test_extract_last_store_entry_wins() {
        let meta = extractor().extract(&details(
            "/db",
            &["LOGSPOOL_STORE=first", "LOGSPOOL_STORE=second"],
            &[],
        ));
        assert_eq!(meta.store, "second");
    }

    #[test]
    fn test_extract_malformed_env_entry_ignored() {
        let meta = extractor().extract(&details("/db", &["LOGSPOOL_STORE"], &[]));
        assert_eq!(meta.store, "");
    }

    #[test]
    fn test_extract_store_value_may_contain_equals() {
        let meta = extractor().extract(&details("/db", &["LOGSPOOL_STORE=a=b"], &[]));
        assert_eq!(meta.store, "a=b");
    }
}
