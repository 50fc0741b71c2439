//! Build script for panelcfg-setup
//!
//! - Validates user_setup.toml at compile time
//! - Generates the `USER_SETUP` constant from it

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use panelcfg_tool::{codegen, file, report};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PANELCFG_USER_SETUP");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let setup_path = match env::var("PANELCFG_USER_SETUP") {
        Ok(path) => manifest_dir.join(path),
        Err(_) => manifest_dir.join("user_setup.toml"),
    };

    generate_setup(&setup_path);
}

/// Validate the setup file and write OUT_DIR/user_setup.rs
fn generate_setup(path: &Path) {
    println!("cargo:rerun-if-changed={}", path.display());

    if !path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: user setup not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  Create user_setup.toml in the panelcfg-setup directory, or set  ║\n\
            ║  PANELCFG_USER_SETUP to the path of a setup file.                ║\n\
            ║                                                                  ║\n\
            ║  `panelcfg preset` prints a working example.                     ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let setup = match file::load_file(path) {
        Ok(setup) => setup,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to load user setup                                ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                report::boxed_lines(&e.to_string())
            );
        }
    };

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let findings = setup.check();
    for warning in &findings.warnings {
        println!("cargo:warning={source}: {warning}");
    }
    if !findings.is_ok() {
        panic!("\n{}", report::render_report(&source, &findings));
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let code = codegen::render_const("USER_SETUP", &source, &setup);
    fs::write(out_dir.join("user_setup.rs"), code).unwrap();
}
