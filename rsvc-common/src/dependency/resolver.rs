// rsvc-common/src/dependency/resolver.rs
use std::collections::HashSet;

use tracing::{debug, error, warn};

use super::set::UnfulfilledSet;
use crate::catalog::Catalog;
use crate::config::{make_full_type_name, SERVICE_NAMESPACE};
use crate::model::ServiceType;
use crate::status::{self, Status};
use crate::store::DependencyStore;

/// Walks a type's declared libraries and, recursively, its peers' libraries,
/// collecting everything the store does not report as installed.
///
/// Problems met along the way (unknown types, dangling peers, peer cycles) are
/// logged and kept in [`errors`](Self::errors); resolution itself never fails.
pub struct Resolver<'a> {
    catalog: &'a dyn Catalog,
    store: &'a DependencyStore,
    /// Types on the current descent path.
    visiting: HashSet<String>,
    /// Types fully walked during the current call.
    resolved: HashSet<String>,
    errors: Vec<Status>,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a dyn Catalog, store: &'a DependencyStore) -> Self {
        Self {
            catalog,
            store,
            visiting: HashSet::new(),
            resolved: HashSet::new(),
            errors: Vec::new(),
        }
    }

    /// Unfulfilled libraries of `type_name` and all of its peers, in first-seen order.
    /// An unknown type yields an empty set plus an error record.
    pub fn unfulfilled(&mut self, type_name: &str) -> UnfulfilledSet {
        let full_name = make_full_type_name(type_name, SERVICE_NAMESPACE);
        let mut unfulfilled = UnfulfilledSet::new();
        self.visiting.clear();
        self.resolved.clear();

        let catalog = self.catalog;
        match catalog.get_type(&full_name) {
            Some(service_type) => self.collect(service_type, &mut unfulfilled),
            None => {
                error!("{} not found", full_name);
                self.errors.push(Status::error(
                    status::UNKNOWN_TYPE,
                    format!("{full_name} not found"),
                ));
            }
        }

        debug!(
            "Unfulfilled dependencies for {}: {:?}",
            full_name,
            unfulfilled.keys()
        );
        unfulfilled
    }

    /// True iff the type is in the catalog and nothing it needs is missing.
    pub fn is_installed(&mut self, type_name: &str) -> bool {
        let full_name = make_full_type_name(type_name, SERVICE_NAMESPACE);
        if !self.catalog.type_exists(&full_name) {
            error!("unknown service {}", full_name);
            self.errors.push(Status::error(
                status::UNKNOWN_TYPE,
                format!("unknown service {full_name}"),
            ));
            return false;
        }
        self.unfulfilled(&full_name).is_empty()
    }

    pub fn errors(&self) -> &[Status] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Status> {
        self.errors
    }

    fn collect(&mut self, service_type: &'a ServiceType, out: &mut UnfulfilledSet) {
        self.visiting.insert(service_type.name.clone());

        for library in &service_type.dependencies {
            if !self.store.is_fulfilled(library) {
                out.insert(library.clone());
            }
        }

        for (slot, peer) in &service_type.peers {
            let peer_name = make_full_type_name(&peer.full_type_name, SERVICE_NAMESPACE);

            if self.visiting.contains(&peer_name) {
                warn!(
                    "Peer cycle detected: {} -> {} ({}) is already being resolved",
                    service_type.name, peer_name, slot
                );
                self.errors.push(Status::error(
                    status::PEER_CYCLE,
                    format!(
                        "peer '{slot}' of {} leads back to {peer_name}",
                        service_type.name
                    ),
                ));
                continue;
            }
            if self.resolved.contains(&peer_name) {
                continue;
            }

            let catalog = self.catalog;
            match catalog.get_type(&peer_name) {
                Some(peer_type) => self.collect(peer_type, out),
                None => {
                    error!("{} not found (peer '{}' of {})", peer_name, slot, service_type.name);
                    self.errors.push(Status::error(
                        status::MISSING_PEER,
                        format!(
                            "peer '{slot}' of {} references unknown type {peer_name}",
                            service_type.name
                        ),
                    ));
                }
            }
        }

        self.visiting.remove(&service_type.name);
        self.resolved.insert(service_type.name.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::ServiceData;
    use crate::model::LibraryDependency;

    fn store() -> DependencyStore {
        DependencyStore::new(PathBuf::from("unused/repo.json"), Vec::new())
    }

    fn eyelids_catalog() -> ServiceData {
        let mut data = ServiceData::new();
        let mut eyelids = ServiceType::new("Eyelids");
        eyelids.add_peer("arduino", "Arduino", "controller");
        let mut arduino = ServiceType::new("Arduino");
        arduino.add_dependency("drv", "serial", "2.2");
        data.add(eyelids).add(arduino);
        data
    }

    #[test]
    fn peer_dependencies_are_collected() {
        let catalog = eyelids_catalog();
        let store = store();
        let mut resolver = Resolver::new(&catalog, &store);
        assert_eq!(
            resolver.unfulfilled("Eyelids").keys(),
            vec!["drv:serial:2.2".to_string()]
        );
        assert!(resolver.errors().is_empty());
    }

    #[test]
    fn installed_records_are_skipped() {
        let catalog = eyelids_catalog();
        let mut store = store();
        store.mark_installed(&LibraryDependency::new("drv", "serial", "2.2"));
        let mut resolver = Resolver::new(&catalog, &store);
        assert!(resolver.unfulfilled("Eyelids").is_empty());
        assert!(resolver.is_installed("Eyelids"));
    }

    #[test]
    fn shared_peers_are_deduplicated() {
        let mut catalog = eyelids_catalog();
        let mut head = ServiceType::new("Head");
        head.add_dependency("head", "lib", "1.0")
            .add_peer("eyelids", "Eyelids", "")
            .add_peer("jaw", "Arduino", "");
        catalog.add(head);

        let store = store();
        let mut resolver = Resolver::new(&catalog, &store);
        assert_eq!(
            resolver.unfulfilled("Head").keys(),
            vec!["head:lib:1.0".to_string(), "drv:serial:2.2".to_string()]
        );
        assert!(resolver.errors().is_empty());
    }

    #[test]
    fn dangling_peer_does_not_stop_siblings() {
        let mut catalog = eyelids_catalog();
        let mut head = ServiceType::new("Head");
        head.add_peer("a_missing", "Ghost", "")
            .add_peer("b_eyelids", "Eyelids", "");
        catalog.add(head);

        let store = store();
        let mut resolver = Resolver::new(&catalog, &store);
        assert_eq!(
            resolver.unfulfilled("Head").keys(),
            vec!["drv:serial:2.2".to_string()]
        );
        assert_eq!(resolver.errors().len(), 1);
        assert_eq!(resolver.errors()[0].key, status::MISSING_PEER);
    }

    #[test]
    fn peer_cycles_terminate_and_are_reported() {
        let mut catalog = ServiceData::new();
        let mut left = ServiceType::new("Left");
        left.add_dependency("l", "left", "1").add_peer("other", "Right", "");
        let mut right = ServiceType::new("Right");
        right.add_dependency("r", "right", "1").add_peer("other", "Left", "");
        catalog.add(left).add(right);

        let store = store();
        let mut resolver = Resolver::new(&catalog, &store);
        assert_eq!(
            resolver.unfulfilled("Left").keys(),
            vec!["l:left:1".to_string(), "r:right:1".to_string()]
        );
        let errors = resolver.into_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key, status::PEER_CYCLE);
    }

    #[test]
    fn deep_shared_peer_chains_resolve_each_type_once() {
        const DEPTH: usize = 30;
        let mut catalog = ServiceData::new();
        for level in 0..DEPTH {
            let mut node = ServiceType::new(&format!("Level{level}"));
            node.add_dependency("chain", &format!("lib{level}"), "1");
            if level + 1 < DEPTH {
                let next = format!("Level{}", level + 1);
                node.add_peer("left", &next, "").add_peer("right", &next, "");
            }
            catalog.add(node);
        }

        let store = store();
        let mut resolver = Resolver::new(&catalog, &store);
        let unfulfilled = resolver.unfulfilled("Level0");
        let expected: Vec<String> = (0..DEPTH).map(|l| format!("chain:lib{l}:1")).collect();
        assert_eq!(unfulfilled.keys(), expected);
        assert!(resolver.errors().is_empty());

        // Memo is per call: a second resolution sees the same result.
        assert_eq!(resolver.unfulfilled("Level0").len(), DEPTH);
    }

    #[test]
    fn unknown_type_is_empty_and_recorded() {
        let catalog = eyelids_catalog();
        let store = store();
        let mut resolver = Resolver::new(&catalog, &store);
        assert!(resolver.unfulfilled("DoesNotExist").is_empty());
        assert!(!resolver.is_installed("DoesNotExist"));
        assert_eq!(resolver.errors().len(), 2);
        assert!(resolver
            .errors()
            .iter()
            .all(|s| s.key == status::UNKNOWN_TYPE && s.is_error()));
    }
}
