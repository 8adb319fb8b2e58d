use chrono::Local;
use std::process::Command;

/// Run git with `args`, returning trimmed stdout on success.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    // .git lives at the workspace root, two levels up
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");

    let Some(hash) = git(&["rev-parse", "--short", "HEAD"]) else {
        println!("cargo:rustc-env=BUILD_HASH=unknown");
        return;
    };

    // Tracked-file changes only; untracked files do not mark a build dirty
    let dirty = Command::new("git")
        .args(["diff", "--quiet", "HEAD"])
        .status()
        .map(|s| !s.success())
        .unwrap_or(false);

    let build_hash = if dirty {
        format!("{hash}-dirty-{}", Local::now().format("%Y%m%d-%H%M%S"))
    } else {
        hash
    };

    println!("cargo:rustc-env=BUILD_HASH={build_hash}");
}
