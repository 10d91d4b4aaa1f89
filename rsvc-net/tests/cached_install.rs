use std::fs;

use rsvc_common::backend::{InstallBackend, InstallSession};
use rsvc_common::catalog::ServiceData;
use rsvc_common::config::Config;
use rsvc_common::model::{LibraryDependency, ServiceType};
use rsvc_common::store::DependencyStore;
use rsvc_net::MavenBackend;
use tempfile::TempDir;

// Port 9 (discard) is never served; any network access fails the install.
const OFFLINE_REPO: &str = "http://127.0.0.1:9/maven2";

#[test]
fn cached_artifacts_install_without_network() {
    let tmp = TempDir::new().unwrap();
    let config = Config::with_root(tmp.path());
    let serial = LibraryDependency::new("drv", "serial", "2.2");

    let cached = config.cache_dir().join(serial.repository_path());
    fs::create_dir_all(cached.parent().unwrap()).unwrap();
    fs::write(&cached, b"cached jar").unwrap();

    let mut catalog = ServiceData::new();
    let mut arduino = ServiceType::new("Arduino");
    arduino.add_library(serial.clone());
    catalog.add(arduino);

    let mut store = DependencyStore::for_config(&config);
    let mut errors = Vec::new();
    let cache_dir = config.cache_dir();
    let install_dir = config.install_dir();
    let backend = MavenBackend::new(OFFLINE_REPO).unwrap();

    let mut session = InstallSession::new(&catalog, &mut store, &[], &mut errors, &cache_dir);
    backend.install_at(&mut session, &install_dir, "Arduino").unwrap();

    assert!(store.is_fulfilled(&serial));
    assert!(errors.is_empty());
    assert_eq!(
        fs::read(install_dir.join("serial-2.2.jar")).unwrap(),
        b"cached jar"
    );
}

#[test]
fn unreachable_repository_fails_and_leaves_store_untouched() {
    let tmp = TempDir::new().unwrap();
    let config = Config::with_root(tmp.path());
    let serial = LibraryDependency::new("drv", "serial", "2.2");

    let mut catalog = ServiceData::new();
    let mut arduino = ServiceType::new("Arduino");
    arduino.add_library(serial.clone());
    catalog.add(arduino);

    let mut store = DependencyStore::for_config(&config);
    let mut errors = Vec::new();
    let cache_dir = config.cache_dir();
    let backend = MavenBackend::new(OFFLINE_REPO).unwrap();

    let mut session = InstallSession::new(&catalog, &mut store, &[], &mut errors, &cache_dir);
    let result = backend.install_at(&mut session, &config.install_dir(), "Arduino");

    assert!(result.is_err());
    assert!(!store.is_fulfilled(&serial));
}
