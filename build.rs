//! Generates `include/osrmc/osrmc.h` from the `c_api` and `engine::native` modules.
//!
//! `OSRMC_HEADER_DIR` overrides the output directory (cargo-c and packagers
//! point it at their staging tree). Nothing is written on docs.rs, whose
//! source checkout is read-only.

use std::env;
use std::path::PathBuf;

const HEADER_NAME: &str = "osrmc.h";

fn main() {
    println!("cargo:rerun-if-changed=src/c_api");
    println!("cargo:rerun-if-changed=src/engine/native.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OSRMC_HEADER_DIR");

    if env::var_os("DOCS_RS").is_some() {
        return;
    }

    let crate_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let include_dir = match env::var_os("OSRMC_HEADER_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(&crate_dir).join("include").join("osrmc"),
    };
    std::fs::create_dir_all(&include_dir).expect("Failed to create include directory");

    let mut config = cbindgen::Config::from_file(PathBuf::from(&crate_dir).join("cbindgen.toml"))
        .expect("Unable to read cbindgen.toml");

    // The ABI major/minor come from the `OSRMC_VERSION_*` constants; the
    // package version string is only known here.
    let version = env::var("CARGO_PKG_VERSION").expect("CARGO_PKG_VERSION not set");
    config.after_includes = Some(format!(
        "#define OSRMC_PACKAGE_VERSION \"{}\"\n",
        version
    ));

    let header_path = include_dir.join(HEADER_NAME);
    cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
        .expect("Unable to generate osrmc C header")
        .write_to_file(&header_path);
}
