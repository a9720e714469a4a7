//! Config layering tests that exercise the real process environment.
//!
//! Serialized because process env vars are global state.

use docsmith::config::Config;
use docsmith::env::Env;
use serial_test::serial;

#[test]
#[serial]
fn real_env_model_override() {
    unsafe { std::env::set_var("DOCSMITH_MODEL", "layering-test-model") };

    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(Some(dir.path()), &Env::real()).unwrap();
    assert_eq!(config.provider.model, "layering-test-model");

    unsafe { std::env::remove_var("DOCSMITH_MODEL") };
}

#[test]
#[serial]
fn env_overrides_local_config_file() {
    unsafe { std::env::set_var("DOCSMITH_MAX_ITERATIONS", "7") };

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".docsmith.toml"),
        "[pipeline]\nmax_review_iterations = 4\n",
    )
    .unwrap();

    let config = Config::load(Some(dir.path()), &Env::real()).unwrap();
    assert_eq!(config.pipeline.max_review_iterations, 7);

    unsafe { std::env::remove_var("DOCSMITH_MAX_ITERATIONS") };
}

#[test]
#[serial]
fn local_config_file_applies_without_env() {
    unsafe { std::env::remove_var("DOCSMITH_MAX_ITERATIONS") };

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".docsmith.toml"),
        "[pipeline]\nmax_review_iterations = 4\noutput_dir = \"documentation\"\n",
    )
    .unwrap();

    let config = Config::load(Some(dir.path()), &Env::real()).unwrap();
    assert_eq!(config.pipeline.max_review_iterations, 4);
    assert_eq!(config.pipeline.output_dir, "documentation");
}
