//! Build script for handmouse
//!
//! Stamps the binary with build identification used by the startup banner.

use std::process::Command;

fn stamp(var: &str, cmd: &str, args: &[&str]) {
    let value = Command::new(cmd)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env={var}={value}");
}

fn main() {
    stamp("BUILD_DATE", "date", &["-u", "+%Y-%m-%d"]);
    stamp("GIT_HASH", "git", &["rev-parse", "--short", "HEAD"]);

    println!("cargo:rerun-if-changed=.git/HEAD");
}
