// rsvc-common/src/model/service_type.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::library::LibraryDependency;
use crate::config::{make_full_type_name, simple_name, SERVICE_NAMESPACE};

/// A named sub-service slot that a service type composes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerReservation {
    /// Slot name; always equal to the key it is stored under in `ServiceType::peers`.
    #[serde(default)]
    pub key: String,
    pub full_type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Catalog metadata for one service type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<LibraryDependency>,
    /// Keyed by peer slot name.
    #[serde(default)]
    pub peers: BTreeMap<String, PeerReservation>,
}

impl ServiceType {
    /// Bare names are placed in the service namespace.
    pub fn new(name: &str) -> Self {
        Self {
            name: make_full_type_name(name, SERVICE_NAMESPACE),
            description: None,
            categories: Vec::new(),
            dependencies: Vec::new(),
            peers: BTreeMap::new(),
        }
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    pub fn add_description(&mut self, description: &str) -> &mut Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn add_category(&mut self, category: &str) -> &mut Self {
        if !self.categories.iter().any(|c| c == category) {
            self.categories.push(category.to_string());
        }
        self
    }

    pub fn add_dependency(&mut self, group_id: &str, artifact_id: &str, version: &str) -> &mut Self {
        self.add_library(LibraryDependency::new(group_id, artifact_id, version))
    }

    /// Re-declaring a key replaces nothing; the first declaration wins.
    pub fn add_library(&mut self, dependency: LibraryDependency) -> &mut Self {
        let key = dependency.key();
        if !self.dependencies.iter().any(|d| d.key() == key) {
            self.dependencies.push(dependency);
        }
        self
    }

    /// Reserves peer slot `key` for a service of `peer_type` (bare names are namespaced).
    pub fn add_peer(&mut self, key: &str, peer_type: &str, comment: &str) -> &mut Self {
        self.peers.insert(
            key.to_string(),
            PeerReservation {
                key: key.to_string(),
                full_type_name: make_full_type_name(peer_type, SERVICE_NAMESPACE),
                comment: (!comment.is_empty()).then(|| comment.to_string()),
            },
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_namespaces_names() {
        let mut eyelids = ServiceType::new("InMoovEyelids");
        eyelids
            .add_description("InMoov Eyelids")
            .add_category("robot")
            .add_peer("eyelidleft", "Servo", "eyelidleft or both servo")
            .add_peer("arduino", "Arduino", "Arduino controller for eyelids");

        assert_eq!(eyelids.name, "org.myrobotlab.service.InMoovEyelids");
        assert_eq!(eyelids.simple_name(), "InMoovEyelids");
        assert_eq!(
            eyelids.peers["arduino"].full_type_name,
            "org.myrobotlab.service.Arduino"
        );
        assert_eq!(eyelids.categories, vec!["robot".to_string()]);
    }

    #[test]
    fn duplicate_dependencies_are_ignored() {
        let mut arduino = ServiceType::new("Arduino");
        arduino
            .add_dependency("drv", "serial", "2.2")
            .add_dependency("drv", "serial", "2.2");
        assert_eq!(arduino.dependencies.len(), 1);
    }

    #[test]
    fn deserializes_from_service_data_json() {
        let json = r#"{
            "name": "org.myrobotlab.service.Arduino",
            "dependencies": [{"groupId": "drv", "artifactId": "serial", "version": "2.2"}]
        }"#;
        let st: ServiceType = serde_json::from_str(json).unwrap();
        assert!(st.peers.is_empty());
        assert_eq!(st.dependencies[0].key(), "drv:serial:2.2");
    }
}
