//! Configuration layering: defaults, TOML files, environment.

mod common;

use common::test_utils::scratch_dir;
use serial_test::serial;
use spin_demos::{
    config::AppConfig,
    demos::{Textured, Triangles},
    error::InitError,
    flow::Demo,
};

#[test]
#[serial]
fn defaults_without_files() {
    let dir = scratch_dir("no-config");
    let config = AppConfig::load_from(&dir, AppConfig::default()).expect("defaults load");
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.window.title, "OpenGL");
    assert_eq!((config.window.width, config.window.height), (800, 600));
}

#[test]
fn demo_defaults_differ() {
    let triangles = Triangles::defaults();
    let textured = Textured::defaults();
    assert!(!triangles.window.resizable);
    assert!(textured.window.resizable);
    assert_eq!(triangles.scene.background, [0.0, 0.0, 0.0]);
    assert_eq!(textured.scene.background, [0.1, 0.2, 0.4]);
}

#[test]
#[serial]
fn user_file_overrides_default_file() {
    let dir = scratch_dir("layered-config");
    std::fs::write(
        dir.join("default.toml"),
        "[window]\ntitle = \"From default\"\nwidth = 640\n",
    )
    .expect("write default.toml");
    std::fs::write(dir.join("user.toml"), "[window]\ntitle = \"From user\"\n")
        .expect("write user.toml");

    let config = AppConfig::load_from(&dir, Textured::defaults()).expect("layered load");
    assert_eq!(config.window.title, "From user");
    assert_eq!(config.window.width, 640);
    // Untouched keys keep the demo's defaults.
    assert!(config.window.resizable);
    assert_eq!(config.scene.background, [0.1, 0.2, 0.4]);
}

#[test]
#[serial]
fn env_overrides_files() {
    let dir = scratch_dir("env-config");
    std::fs::write(dir.join("user.toml"), "[scene]\nforce = 0.5\n").expect("write user.toml");

    // SAFETY: serialized with the other env-reading tests
    unsafe {
        std::env::set_var("SPIN_SCENE__FORCE", "0.25");
        std::env::set_var("SPIN_ASSETS__DATA_DIR", "elsewhere");
    }
    let config = AppConfig::load_from(&dir, AppConfig::default());
    unsafe {
        std::env::remove_var("SPIN_SCENE__FORCE");
        std::env::remove_var("SPIN_ASSETS__DATA_DIR");
    }

    let config = config.expect("env load");
    assert_eq!(config.scene.force, 0.25);
    assert_eq!(
        config.assets.base_path(),
        std::path::Path::new("elsewhere").join("doge.png")
    );
}

#[test]
#[serial]
fn malformed_file_is_an_init_failure() {
    let dir = scratch_dir("bad-config");
    std::fs::write(dir.join("user.toml"), "[window]\nwidth = \"wide\"\n").expect("write user.toml");

    let err = AppConfig::load_from(&dir, AppConfig::default()).expect_err("width must be a number");
    let err = InitError::from(err);
    assert_eq!(err.exit_code(), 1);
    assert!(err.to_string().starts_with("Error loading configuration"));
}

#[test]
fn exit_codes_per_failure_site() {
    assert_eq!(InitError::NoAdapter.exit_code(), 1);
    assert_eq!(InitError::Setup(anyhow::anyhow!("bad geometry")).exit_code(), 1);
}

#[test]
fn missing_surface_format_is_not_reported_as_missing_adapter() {
    let err = InitError::NoSurfaceFormat;
    assert_eq!(err.exit_code(), 1);
    assert_ne!(err.to_string(), InitError::NoAdapter.to_string());
    assert!(err.to_string().contains("texture format"));
}
