//! Build script for chart-nationalities.
//!
//! Copies the three dataset CSVs into OUT_DIR so they can be embedded via
//! `include_str!`. Files are read from `../fixtures` unless `NAT_DATA_DIR`
//! points elsewhere. A missing file becomes an empty placeholder, which the
//! app reports as a load error at startup.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DATASET_FILES: [&str; 3] = [
    "data-auto-entreprise-nationalite.csv",
    "data-societe-nationalite.csv",
    "data-tout-confondu-nationalite.csv",
];

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let data_dir = env::var("NAT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("../fixtures"));

    for name in DATASET_FILES {
        let src = data_dir.join(name);
        let dest = Path::new(&out_dir).join(name);
        if src.exists() {
            fs::copy(&src, &dest).unwrap_or_else(|e| {
                panic!("Failed to copy {} to {}: {}", src.display(), dest.display(), e);
            });
        } else {
            fs::write(&dest, "").unwrap();
            println!(
                "cargo:warning=Dataset file {} not found, using empty placeholder",
                src.display()
            );
        }
        println!("cargo:rerun-if-changed={}", src.display());
    }

    println!("cargo:rerun-if-env-changed=NAT_DATA_DIR");
    println!("cargo:rerun-if-changed=build.rs");
}
