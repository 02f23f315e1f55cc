use anyhow::{Context, Result};
use osrmc::{Algorithm, Config, FeatureDataset};
use std::path::PathBuf;

pub fn cmd_config(
    dataset: Option<PathBuf>,
    algorithm: Option<String>,
    disabled: Vec<String>,
    max_locations_viaroute: Option<i32>,
) -> Result<()> {
    let mut config = match &dataset {
        Some(path) => Config::new(path)
            .with_context(|| format!("Failed to open dataset {}", path.display()))?,
        None => Config::shared_memory(),
    };

    if let Some(name) = algorithm {
        let algorithm = match name.to_lowercase().as_str() {
            "ch" => Algorithm::Ch,
            "mld" => Algorithm::Mld,
            _ => anyhow::bail!("Invalid algorithm: '{}'. Must be: ch or mld", name),
        };
        config.set_algorithm(algorithm);
    }
    for name in &disabled {
        let feature: FeatureDataset = name.parse()?;
        config.disable_feature_dataset(feature);
    }
    if let Some(max) = max_locations_viaroute {
        config.set_max_locations_viaroute(max)?;
    }

    let document: serde_json::Value = serde_json::from_str(&config.to_json()?)?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
