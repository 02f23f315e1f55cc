use anyhow::Result;
use osrmc::fingerprint::{fingerprint_path, Fingerprint, DATASET_MAJOR};
use serde_json::json;
use std::path::PathBuf;

pub fn cmd_validate(dataset: PathBuf, json_output: bool) -> Result<()> {
    let path = fingerprint_path(&dataset);
    let outcome = Fingerprint::read_for(&dataset);

    if json_output {
        let output = match &outcome {
            Ok(fp) => json!({
                "dataset": dataset.display().to_string(),
                "fingerprint": path.display().to_string(),
                "is_valid": true,
                "version": fp.to_string(),
                "supported_major": DATASET_MAJOR,
            }),
            Err(e) => json!({
                "dataset": dataset.display().to_string(),
                "fingerprint": path.display().to_string(),
                "is_valid": false,
                "error": e.to_string(),
                "supported_major": DATASET_MAJOR,
            }),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Validating:  {}", dataset.display());
        println!("Fingerprint: {}", path.display());
        println!();
        match &outcome {
            Ok(fp) => {
                println!("✅ VALIDATION PASSED");
                println!("   Prepared with version {}.", fp);
            }
            Err(e) => {
                println!("❌ VALIDATION FAILED");
                println!("   {}", e);
                println!("   This build loads datasets of version {}.x.", DATASET_MAJOR);
            }
        }
    }

    // Exit with appropriate code
    if outcome.is_ok() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
