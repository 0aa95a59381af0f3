use std::env;

fn main() {
    let version =
        env::var("TRICLASS_VERSION").unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap());
    println!("cargo:rustc-env=TRICLASS_VERSION={version}");
    println!("cargo:rerun-if-env-changed=TRICLASS_VERSION");
}
