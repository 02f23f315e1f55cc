use anyhow::{Context, Result};
use osrmc::fingerprint::Fingerprint;
use std::path::PathBuf;

pub fn cmd_fingerprint(dataset: PathBuf, version: String) -> Result<()> {
    let (major, minor, patch) = parse_version(&version)?;
    let fp = Fingerprint::new(major, minor, patch);
    if !fp.is_compatible() {
        eprintln!(
            "Warning: version {} cannot be loaded by this build (expects {}.x)",
            fp,
            osrmc::fingerprint::DATASET_MAJOR
        );
    }

    let path = fp
        .write_for(&dataset)
        .with_context(|| format!("Failed to write fingerprint for {}", dataset.display()))?;
    println!("Wrote {} ({})", path.display(), fp);
    Ok(())
}

fn parse_version(version: &str) -> Result<(u8, u8, u8)> {
    let parts: Vec<&str> = version.trim().split('.').collect();
    if parts.len() != 3 {
        anyhow::bail!("Invalid version '{}': expected MAJOR.MINOR.PATCH", version);
    }
    let component = |s: &str| -> Result<u8> {
        s.parse::<u8>()
            .with_context(|| format!("Invalid version component '{}' in '{}'", s, version))
    };
    Ok((component(parts[0])?, component(parts[1])?, component(parts[2])?))
}
