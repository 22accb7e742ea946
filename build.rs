//! Build script - copies the linker script into the output directory
//! and bakes the build-time UTC epoch used as the on-device clock
//! reference until the phone provides the real time.

use std::env;
use std::fs;
use std::path::PathBuf;

use chrono::Utc;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to OUT_DIR
    fs::copy("memory.x", out_dir.join("memory.x")).unwrap();

    // Tell cargo to look for linker scripts in OUT_DIR
    println!("cargo:rustc-link-search={}", out_dir.display());

    // UTC epoch at build time, included by the embedded binary
    let utc = format!("const UTC_EPOCH: i64 = {};\n", Utc::now().timestamp());
    fs::write(out_dir.join("utc.rs"), utc).unwrap();

    // Rebuild if the linker script changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
