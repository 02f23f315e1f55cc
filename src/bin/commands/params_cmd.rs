use anyhow::{Context, Result};
use osrmc::{OutputFormat, Params, ServiceKind};

pub fn cmd_params(
    service: String,
    coordinates: Vec<String>,
    format: Option<String>,
    no_validate: bool,
) -> Result<()> {
    let kind: ServiceKind = service.parse()?;
    let mut params = Params::new(kind);

    for text in &coordinates {
        let (lon, lat) = parse_coordinate(text)?;
        params
            .add_coordinate(lon, lat)
            .with_context(|| format!("Rejected coordinate '{}'", text))?;
    }
    if let Some(name) = format {
        let format: OutputFormat = name.parse()?;
        params.set_format(format)?;
    }
    if !no_validate {
        params.validate_for(kind)?;
    }

    let document: serde_json::Value = serde_json::from_str(&params.to_json()?)?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn parse_coordinate(text: &str) -> Result<(f64, f64)> {
    let (lon, lat) = text
        .split_once(',')
        .with_context(|| format!("Invalid coordinate '{}': expected LON,LAT", text))?;
    let lon = lon
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid longitude in '{}'", text))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid latitude in '{}'", text))?;
    Ok((lon, lat))
}
