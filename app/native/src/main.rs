// Prevents an extra console window on Windows in release builds.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use halo_lib::cli::Cli;

fn main() {
    let cli = Cli::parse();
    halo_lib::run(&cli);
}
