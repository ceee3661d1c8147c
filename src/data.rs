//! Listing fetch, on-disk caching, and view-state persistence.

use crate::model::Doctor;
use crate::query::{decode_query_line, encode_query_line};
use anyhow::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::time::Duration;

/// Default listing endpoint. One unauthenticated GET, one batch, no paging.
pub const DEFAULT_LISTING_URL: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

const CACHE_EXPIRY: Duration = Duration::from_secs(3600);

pub fn get_cache_dir() -> Result<std::path::PathBuf> {
    let project_dirs = directories::ProjectDirs::from("com", "docfind", "docfind-tui")
        .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))?;
    let cache_dir = project_dirs.cache_dir().to_path_buf();
    fs::create_dir_all(&cache_dir)?;
    Ok(cache_dir)
}

pub fn get_data_dir() -> Result<std::path::PathBuf> {
    let project_dirs = directories::ProjectDirs::from("com", "docfind", "docfind-tui")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = project_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir)
}

/// Fetches the doctor listing, reusing a cached copy younger than an hour
/// unless `force` is set.
pub fn fetch_doctors(url: &str, force: bool) -> Result<Vec<Doctor>> {
    let cache_dir = get_cache_dir()?;
    let listing_path = cache_dir.join("listing.json");

    let mut should_download = force || !listing_path.exists();
    if !should_download
        && let Ok(metadata) = fs::metadata(&listing_path)
        && let Ok(modified) = metadata.modified()
        && let Ok(elapsed) = modified.elapsed()
        && elapsed > CACHE_EXPIRY
    {
        should_download = true;
    }

    let content = if should_download {
        let client = reqwest::blocking::Client::builder().build()?;
        let response = client.get(url).send()?;
        if !response.status().is_success() {
            anyhow::bail!("Failed to download {}: {}", url, response.status());
        }
        let bytes = response.bytes()?;
        fs::write(&listing_path, &bytes)?;
        String::from_utf8(bytes.to_vec())?
    } else {
        fs::read_to_string(&listing_path)?
    };

    parse_listing(&content)
}

pub fn load_doctors_from_file(path: &str) -> Result<Vec<Doctor>> {
    if !std::path::Path::new(path).exists() {
        anyhow::bail!("File not found: {}", path);
    }
    parse_listing(&fs::read_to_string(path)?)
}

/// Parses the listing payload. Individual malformed entries are skipped so
/// one bad record never empties the whole view.
pub fn parse_listing(content: &str) -> Result<Vec<Doctor>> {
    let values: Vec<Value> = serde_json::from_str(content)?;
    Ok(values
        .into_iter()
        .filter_map(|value| serde_json::from_value::<Doctor>(value).ok())
        .collect())
}

pub fn params_path() -> Result<std::path::PathBuf> {
    Ok(get_data_dir()?.join("view.params"))
}

/// Restores the persisted view state. Any failure yields an empty store; a
/// missing or corrupt state file is not an error condition.
pub fn load_params() -> BTreeMap<String, String> {
    params_path()
        .ok()
        .and_then(|path| fs::read_to_string(path).ok())
        .map(|line| decode_query_line(&line))
        .unwrap_or_default()
}

/// Best-effort persistence of the current view state.
pub fn save_params(params: &BTreeMap<String, String>) {
    if let Ok(path) = params_path() {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(&path, encode_query_line(params));
    }
}
