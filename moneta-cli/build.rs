use std::path::Path;
use std::process::Command;

/// Stamps `MONETA_BUILD_SHA` for `moneta --version`. A value already set in
/// the environment (release pipelines, tarball builds) wins over git.
fn main() {
    println!("cargo:rerun-if-env-changed=MONETA_BUILD_SHA");

    let sha = std::env::var("MONETA_BUILD_SHA")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").ok()?;
            git_short_sha(Path::new(&manifest_dir).parent()?)
        })
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=MONETA_BUILD_SHA={sha}");
}

fn git_short_sha(workspace: &Path) -> Option<String> {
    let out = Command::new("git")
        .arg("-C")
        .arg(workspace)
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8(out.stdout).ok()?;
    let sha = sha.trim();
    (!sha.is_empty()).then(|| sha.to_string())
}
