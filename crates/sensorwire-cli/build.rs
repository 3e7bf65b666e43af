use std::env;
use std::process::Command;

const UNKNOWN: &str = "unknown";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let commit = env::var("GITHUB_SHA")
        .ok()
        .filter(|sha| !sha.is_empty())
        .or_else(|| git(&["rev-parse", "HEAD"]))
        .map(|sha| sha.chars().take(7).collect::<String>())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let date = git(&["log", "-1", "--format=%cs"])
        .or_else(|| env::var("SOURCE_DATE_EPOCH").ok())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| UNKNOWN.to_string());

    println!("cargo:rustc-env=SENSORWIRE_BUILD_COMMIT={commit}");
    println!("cargo:rustc-env=SENSORWIRE_BUILD_DATE={date}");
    println!("cargo:rustc-env=SENSORWIRE_LONG_VERSION={version} (commit {commit}, built {date})");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}
