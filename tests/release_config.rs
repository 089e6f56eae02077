//! Guards the size-focused release profile of the rigup binary.

fn release_profile() -> &'static str {
    let cargo_toml = include_str!("../Cargo.toml");
    let start = cargo_toml
        .find("[profile.release]")
        .expect("Cargo.toml must have a [profile.release] section");
    let rest = &cargo_toml[start + "[profile.release]".len()..];
    match rest.find("\n[") {
        Some(end) => &rest[..end],
        None => rest,
    }
}

#[test]
fn release_profile_optimizes_for_size() {
    let profile = release_profile();
    for setting in ["lto = true", "strip = true", "codegen-units = 1", "opt-level = \"z\""] {
        assert!(
            profile.lines().any(|l| l.trim() == setting),
            "release profile is missing `{}`",
            setting
        );
    }
}

#[test]
fn package_is_named_rigup() {
    let cargo_toml = include_str!("../Cargo.toml");
    assert!(cargo_toml.lines().any(|l| l.trim() == "name = \"rigup\""));
}
