//! Model manifest utility for vitalrisk models.
//!
//! Checks that the model is a well-formed export and writes a `manifest.json`
//! next to it binding the file by SHA-256, which the loader verifies at
//! runtime. Given a directory, the model is `<dir>/model.json`; given a file,
//! that file is bound under its own name.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin hash_model -- <model_dir | model_file>
//! ```

use std::env;
use std::path::PathBuf;

use vitalrisk::adapters::model::ModelManifest;

fn usage() -> String {
    "Usage: hash_model <model_dir | model_file>".to_string()
}

fn parse_args() -> Result<PathBuf, String> {
    let mut model_path: Option<PathBuf> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => return Err(usage()),
            _ => {
                if model_path.is_none() {
                    model_path = Some(PathBuf::from(arg));
                } else {
                    return Err(usage());
                }
            }
        }
    }

    model_path.ok_or_else(usage)
}

fn main() -> Result<(), String> {
    let model_path = parse_args()?;

    let (manifest_path, manifest) =
        ModelManifest::write_for_model(&model_path).map_err(|e| e.to_string())?;

    println!("Wrote manifest: {manifest_path:?}");
    for (file, digest) in &manifest.files {
        println!("  {file} sha256={digest}");
    }

    Ok(())
}
