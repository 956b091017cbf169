// Build script for ots-sys
// Emits link flags for the prebuilt OTS library when the `native` feature is on

use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=OTS_LIB_DIR");
    println!("cargo:rerun-if-env-changed=OTS_STATIC");

    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    if let Ok(dir) = env::var("OTS_LIB_DIR") {
        println!("cargo:rustc-link-search=native={}", dir);
    }

    let kind = if env::var_os("OTS_STATIC").is_some() {
        "static"
    } else {
        "dylib"
    };
    println!("cargo:rustc-link-lib={}=ots", kind);

    // The library is C++ and its static archive needs the C++ runtime
    if kind == "static" {
        let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        match target_os.as_str() {
            "macos" | "ios" => println!("cargo:rustc-link-lib=c++"),
            "windows" => {}
            _ => println!("cargo:rustc-link-lib=stdc++"),
        }
    }
}
