// Build script for archsimctl - embeds version at compile time

fn main() {
    // Release builds may override the version from the environment
    let version =
        std::env::var("ARCHSIM_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=ARCHSIM_VERSION={}", version);

    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=ARCHSIM_VERSION");
}
