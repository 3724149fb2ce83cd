//! Generates `u_explore.h` from the `ffi` module.

use std::path::Path;

const HEADER: &str = "u_explore.h";

fn main() {
    println!("cargo:rerun-if-changed=src/ffi.rs");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let crate_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR must be set by Cargo");
    let config = cbindgen::Config::from_file(Path::new(&crate_dir).join("cbindgen.toml"))
        .unwrap_or_default();

    let bindings = match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
    {
        Ok(b) => b,
        Err(e) => {
            println!("cargo:warning=skipping C header generation: {e}");
            return;
        }
    };

    bindings.write_to_file(Path::new(&out_dir).join(HEADER));

    // Checked-in copy for C consumers building against the source tree.
    let include_dir = Path::new(&crate_dir).join("include");
    if std::fs::create_dir_all(&include_dir).is_ok() {
        bindings.write_to_file(include_dir.join(HEADER));
    }
}
