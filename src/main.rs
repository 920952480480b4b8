use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use filament_resolver::config::{load_config, load_or_default};
use filament_resolver::{
    FilamentResolver, FilamentSettingCommand, ResolutionInput, ResolutionResult,
};

/// Request file: a resolution input plus an optional config override.
#[derive(Debug, Deserialize)]
struct ResolutionRequest {
    #[serde(default)]
    config_path: Option<PathBuf>,
    #[serde(flatten)]
    input: ResolutionInput,
}

#[derive(Debug, Serialize)]
struct ResolutionReport {
    result: ResolutionResult,
    command: Option<FilamentSettingCommand>,
    command_error: Option<String>,
}

fn read_request(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(arg).with_context(|| format!("Failed to read request {:?}", arg))
}

fn main() -> Result<()> {
    filament_resolver::init_tracing();

    let Some(arg) = std::env::args().nth(1) else {
        bail!("usage: resolve-tray <request.json | ->");
    };

    let content = read_request(&arg)?;
    let request: ResolutionRequest =
        serde_json::from_str(&content).context("Invalid resolution request")?;

    let config = match &request.config_path {
        Some(path) => load_config(path)?,
        None => load_or_default(),
    };
    let resolver = FilamentResolver::new(config);

    let result = resolver.resolve(&request.input);
    info!(
        "Tray {}: {} presets, profile {:?}, K={}",
        request.input.tray.tray_id,
        result.ranked_presets.len(),
        result
            .matched_calibration_profile
            .as_ref()
            .map(|p| p.name.as_str()),
        result.resolved_k
    );

    let (command, command_error) = match resolver.build_setting_command(&request.input, &result) {
        Ok(command) => (Some(command), None),
        Err(e) => {
            warn!("No printer command for tray {}: {}", request.input.tray.tray_id, e);
            (None, Some(e.to_string()))
        }
    };

    let report = ResolutionReport {
        result,
        command,
        command_error,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
