//! Loading the catalogue from the marketplace spreadsheet export.
//!
//! The export is either CSV (the spreadsheet's native download) or a JSON
//! array of row objects. Rows are loosely typed: column names vary in case
//! and spacing, optional columns may be missing, and cells may hold numbers
//! where text is expected. Everything is coerced here, once, so the ranking
//! code sees well-typed [`ArtworkRecord`]s.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;
use uuid::Uuid;

use super::Catalogue;
use crate::models::ArtworkRecord;

/// Load a catalogue snapshot. Files ending in `.csv` are read as CSV with a
/// header row; anything else as a JSON array of row objects.
///
/// A missing file yields an empty catalogue so the server can start before
/// the first export lands.
pub fn load_catalogue(path: &Path) -> Result<Catalogue> {
    if !path.exists() {
        tracing::warn!("Catalogue file {} not found, starting empty", path.display());
        return Ok(Catalogue::empty());
    }

    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalogue {}", path.display()))?;
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let artworks = if is_csv {
        parse_catalogue_csv(&data)
    } else {
        parse_catalogue(&data)
    }
    .with_context(|| format!("Failed to parse catalogue {}", path.display()))?;
    tracing::info!("Loaded {} artworks from {}", artworks.len(), path.display());
    Ok(Catalogue::new(artworks))
}

/// Parse JSON catalogue rows, skipping rows without a title.
pub fn parse_catalogue(data: &str) -> Result<Vec<ArtworkRecord>> {
    let rows: Vec<Value> = serde_json::from_str(data).context("Catalogue is not a JSON array")?;

    let mut artworks = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let Value::Object(obj) = row else {
            tracing::warn!("Skipping catalogue row {i}: not an object");
            continue;
        };
        push_row(&mut artworks, i, obj);
    }
    Ok(artworks)
}

/// Parse a CSV export with a header row. Short rows leave the missing
/// columns empty; surplus cells are ignored.
pub fn parse_catalogue_csv(data: &str) -> Result<Vec<ArtworkRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());
    let headers = reader
        .headers()
        .context("Catalogue CSV has no header row")?
        .clone();

    let mut artworks = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed catalogue CSV row {i}"))?;
        let obj: Map<String, Value> = headers
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| (column.to_string(), Value::String(cell.to_string())))
            .collect();
        push_row(&mut artworks, i, obj);
    }
    Ok(artworks)
}

fn push_row(artworks: &mut Vec<ArtworkRecord>, i: usize, obj: Map<String, Value>) {
    match record_from_row(&normalize_columns(obj)) {
        Some(record) => artworks.push(record),
        None => tracing::warn!("Skipping catalogue row {i}: empty title"),
    }
}

/// Lower-case and trim column names, replacing inner spaces with `_`.
fn normalize_columns(obj: Map<String, Value>) -> Map<String, Value> {
    obj.into_iter()
        .map(|(k, v)| {
            let key = k
                .trim()
                .to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("_");
            (key, v)
        })
        .collect()
}

fn record_from_row(row: &Map<String, Value>) -> Option<ArtworkRecord> {
    let title = text_field(row, &["title"]);
    if title.is_empty() {
        return None;
    }

    let link = text_field(row, &["image_ref", "image", "link"]);
    let image_ref = if link.is_empty() {
        None
    } else {
        Some(drive_display_url(&link))
    };

    Some(ArtworkRecord {
        id: Uuid::new_v4(),
        title,
        artist: text_field(row, &["artist"]),
        price_range: text_field(row, &["price_range"]),
        price: row.get("price").and_then(parse_price),
        suburb: text_field(row, &["suburb"]),
        tags: tags_field(row),
        style: text_field(row, &["style"]),
        medium: text_field(row, &["medium"]),
        image_ref,
    })
}

/// First non-empty cell among the given column aliases, coerced to text.
fn text_field(row: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| row.get(*k))
        .map(cell_text)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn tags_field(row: &Map<String, Value>) -> Vec<String> {
    let Some(value) = row.get("tags").or_else(|| row.get("tag")) else {
        return Vec::new();
    };

    match value {
        Value::Array(items) => items
            .iter()
            .map(cell_text)
            .filter(|s| !s.is_empty())
            .collect(),
        other => cell_text(other)
            .split([',', ';', '|'])
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
    }
}

/// Numeric price from a cell such as `"AUD $1,200"`; anything unparsable is `None`.
pub fn parse_price(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let digits: String = s
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

/// Rewrite a Google Drive share link into a thumbnail URL that renders
/// inline. Other links are returned unchanged.
pub fn drive_display_url(link: &str) -> String {
    if link.contains("drive.google.com") {
        if let Some((_, rest)) = link.split_once("/d/") {
            if let Some(file_id) = rest.split('/').next().filter(|id| !id.is_empty()) {
                return format!("https://drive.google.com/thumbnail?id={file_id}");
            }
        }
    }
    link.to_string()
}
