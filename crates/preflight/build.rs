fn main() {
    // If PREFLIGHT_VERSION is set during the build (e.g., in CI),
    // pass it to the rustc compiler.
    println!("cargo:rerun-if-env-changed=PREFLIGHT_VERSION");
    if let Ok(version) = std::env::var("PREFLIGHT_VERSION") {
        println!("cargo:rustc-env=PREFLIGHT_VERSION={version}");
    }
}
