#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// Fresh `VSL_HOME` for one test.
pub fn home() -> TempDir {
    TempDir::new().expect("create temp home")
}

/// `vsl_cli` in script mode, isolated under `home`.
pub fn script(home: &Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("vsl_cli")
        .expect("vsl_cli binary")
        .env("VSL_HOME", home)
        .env("VSL_CLI_SCRIPT", "1")
        .env("RUST_LOG", "off")
        .write_stdin(input.to_string())
        .assert()
}

pub fn write_config(home: &Path, json: &str) {
    let dir = home.join("config");
    std::fs::create_dir_all(&dir).expect("create config dir");
    std::fs::write(dir.join("config.json"), json).expect("write config");
}
