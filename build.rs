use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_default();
    let dirty = git(&["status", "--porcelain"]).is_some_and(|s| !s.is_empty());

    // A release build is a clean checkout sitting exactly on the version tag.
    let version = env!("CARGO_PKG_VERSION");
    let tagged = git(&["tag", "--points-at", "HEAD"]).is_some_and(|tags| {
        tags.lines()
            .any(|tag| tag == version || tag == format!("v{}", version))
    });

    println!("cargo:rustc-env=GIT_HASH={}", hash);
    println!("cargo:rustc-env=IS_RELEASE={}", tagged && !dirty);
}
