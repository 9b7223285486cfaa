use std::process::Command;

use cairn_blocks::{Block, get_block_texture};

const CHILD_ENV: &str = "CAIRN_TEXTURE_ABORT_CHILD";

// Runs only inside the child process spawned below.
#[test]
fn texture_lookup_for_none_aborts_in_child() {
    if std::env::var_os(CHILD_ENV).is_none() {
        return;
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    get_block_texture(Block::NONE, 0);
}

#[test]
fn failed_texture_lookup_logs_once_and_aborts() {
    let exe = std::env::current_exe().unwrap();
    let out = Command::new(exe)
        .args(["--exact", "texture_lookup_for_none_aborts_in_child", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, "1")
        .env("RUST_LOG", "error")
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("get_block_texture:").count(), 1, "{stderr}");
    assert!(stderr.contains("has no texture"), "{stderr}");
}
