// rsvc-common/src/catalog.rs
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::{make_full_type_name, SERVICE_NAMESPACE};
use super::error::{Result, RsvcError};
use super::model::ServiceType;

/// Read-only source of service type metadata.
pub trait Catalog: Send + Sync {
    /// All known types, ordered by fully-qualified name.
    fn list_types(&self) -> Vec<&ServiceType>;

    /// Exact lookup by fully-qualified name.
    fn get_type(&self, name: &str) -> Option<&ServiceType>;

    fn type_exists(&self, name: &str) -> bool {
        self.get_type(name).is_some()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceDataFile {
    #[serde(default)]
    service_types: Vec<ServiceType>,
}

/// In-memory catalog, usually loaded from `serviceData.json`.
#[derive(Debug, Clone, Default)]
pub struct ServiceData {
    types: BTreeMap<String, ServiceType>,
}

impl ServiceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading service data from {}", path.display());
        if !path.is_file() {
            return Err(RsvcError::NotFound(format!(
                "service data file {}",
                path.display()
            )));
        }
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: ServiceDataFile = serde_json::from_str(raw)?;
        let mut data = Self::new();
        for mut service_type in file.service_types {
            service_type.name = make_full_type_name(&service_type.name, SERVICE_NAMESPACE);
            for (slot, peer) in service_type.peers.iter_mut() {
                if peer.key != *slot {
                    if !peer.key.is_empty() {
                        warn!(
                            "{}: peer slot '{}' declares key '{}', using the slot name",
                            service_type.name, slot, peer.key
                        );
                    }
                    peer.key = slot.clone();
                }
            }
            if data.types.contains_key(&service_type.name) {
                return Err(RsvcError::Catalog(format!(
                    "service type '{}' declared more than once",
                    service_type.name
                )));
            }
            data.add(service_type);
        }
        debug!("Parsed {} service types.", data.types.len());
        Ok(data)
    }

    pub fn to_json(&self) -> Result<String> {
        let file = ServiceDataFile {
            service_types: self.types.values().cloned().collect(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Adds or replaces a type under its fully-qualified name.
    pub fn add(&mut self, service_type: ServiceType) -> &mut Self {
        self.types.insert(service_type.name.clone(), service_type);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Catalog for ServiceData {
    fn list_types(&self) -> Vec<&ServiceType> {
        self.types.values().collect()
    }

    fn get_type(&self, name: &str) -> Option<&ServiceType> {
        self.types.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_lists_in_name_order() {
        let raw = r#"{"serviceTypes": [
            {"name": "Servo"},
            {"name": "org.myrobotlab.service.Arduino"}
        ]}"#;
        let data = ServiceData::from_json(raw).unwrap();
        let names: Vec<&str> = data.list_types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["org.myrobotlab.service.Arduino", "org.myrobotlab.service.Servo"]
        );
        assert!(data.type_exists("org.myrobotlab.service.Servo"));
        assert!(!data.type_exists("Servo"));
    }

    #[test]
    fn duplicate_types_are_rejected() {
        let raw = r#"{"serviceTypes": [
            {"name": "Servo"},
            {"name": "org.myrobotlab.service.Servo"}
        ]}"#;
        assert!(matches!(
            ServiceData::from_json(raw),
            Err(RsvcError::Catalog(_))
        ));
    }

    #[test]
    fn json_round_trip_keeps_types() {
        let mut data = ServiceData::new();
        let mut arduino = ServiceType::new("Arduino");
        arduino.add_dependency("drv", "serial", "2.2");
        data.add(arduino.clone());

        let reloaded = ServiceData::from_json(&data.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.get_type(&arduino.name), Some(&arduino));
    }

    #[test]
    fn peer_keys_follow_their_slot_names() {
        let raw = r#"{"serviceTypes": [
            {"name": "Eyelids", "peers": {
                "arduino": {"fullTypeName": "org.myrobotlab.service.Arduino"},
                "servo": {"key": "wrong", "fullTypeName": "org.myrobotlab.service.Servo"}
            }}
        ]}"#;
        let data = ServiceData::from_json(raw).unwrap();
        let eyelids = data.get_type("org.myrobotlab.service.Eyelids").unwrap();
        assert_eq!(eyelids.peers["arduino"].key, "arduino");
        assert_eq!(eyelids.peers["servo"].key, "servo");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = ServiceData::load(Path::new("/nonexistent/serviceData.json")).unwrap_err();
        assert!(matches!(err, RsvcError::NotFound(_)));
    }
}
