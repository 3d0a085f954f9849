//! Integration tests for demo registry loading.
//!
//! These tests exercise file loading and the public helpers alongside the
//! bundled fixture.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use example_data::{
    DemoRegistry, RegistryError, VehicleTypeSeed, block_code_of, generate_demo_dataset,
};
use rstest::rstest;

fn unique_temp_path(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("example-data-{label}-{nanos}.json"))
}

#[test]
fn loads_registry_from_file() {
    let path = unique_temp_path("load");
    let bundled = include_str!("../fixtures/demo-registry.json");
    fs::write(&path, bundled).expect("write registry");

    let registry = DemoRegistry::from_file(&path).expect("registry loads");
    fs::remove_file(&path).expect("cleanup");

    assert_eq!(registry, DemoRegistry::bundled().expect("bundled registry"));
}

#[test]
fn missing_file_reports_io_error() {
    let path = unique_temp_path("missing");
    let result = DemoRegistry::from_file(&path);

    assert!(matches!(result, Err(RegistryError::IoError { .. })));
}

#[test]
fn demo_admin_credentials_are_documented() {
    let registry = DemoRegistry::bundled().expect("bundled registry");
    let credentials: Vec<(&str, &str)> = registry
        .admins()
        .iter()
        .map(|admin| (admin.username.as_str(), admin.password.as_str()))
        .collect();

    assert_eq!(credentials, [("admin", "admin123"), ("manager", "manager123")]);
}

#[rstest]
#[case("51A-12345", VehicleTypeSeed::Car)]
#[case("51A-67890", VehicleTypeSeed::Motorcycle)]
#[case("51G-66666", VehicleTypeSeed::Motorcycle)]
fn bundled_vehicle_types(#[case] plate: &str, #[case] expected: VehicleTypeSeed) {
    let registry = DemoRegistry::bundled().expect("bundled registry");
    let vehicle = registry
        .vehicles()
        .iter()
        .find(|vehicle| vehicle.plate == plate)
        .expect("vehicle present");

    assert_eq!(vehicle.vehicle_type, expected);
}

#[test]
fn every_vehicle_owner_block_is_generated() {
    let registry = DemoRegistry::bundled().expect("bundled registry");
    let dataset = generate_demo_dataset(&registry);

    for resident in &dataset.residents {
        let block = block_code_of(&resident.apartment_code);
        assert!(dataset.blocks.iter().any(|b| b.code == block));
    }
}
