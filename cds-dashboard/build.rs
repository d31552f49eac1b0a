//! Build script for cds-dashboard.
//!
//! Copies the aggregated and unaggregated tables from `../data/` into
//! `OUT_DIR` so they can be embedded via `include_str!`. The dashboard has
//! no degraded mode, so a missing table fails the build.

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    let files = [
        ("../data/agg_cd_data.csv", "agg_cd_data.csv"),
        ("../data/unagg_tweet.csv", "unagg_tweet.csv"),
    ];

    for (src_path, dest_name) in &files {
        let src = Path::new(src_path);
        let dest = Path::new(&out_dir).join(dest_name);
        if !src.exists() {
            panic!("Data file {} not found; the dashboard cannot start without it", src_path);
        }
        fs::copy(src, &dest).unwrap_or_else(|e| {
            panic!("Failed to copy {} to {}: {}", src_path, dest.display(), e);
        });
        println!("cargo:rerun-if-changed={}", src_path);
    }

    println!("cargo:rerun-if-changed=build.rs");
}
