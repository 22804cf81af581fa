use std::path::Path;

use tracing::{info, warn};

use crate::error::{LookupError, Result};
use crate::ingest::{structured, tabular};
use crate::models::Food;

/// How a dataset is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum IngestMode {
    /// Comma-separated text with three header lines.
    #[default]
    Csv,
    /// JSON array of typed food objects.
    Json,
}

impl IngestMode {
    /// Pick a mode from the file extension: `.json` is structured,
    /// everything else is tabular.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => IngestMode::Json,
            _ => IngestMode::Csv,
        }
    }
}

/// Parse dataset text already in memory.
pub fn parse_dataset(text: &str, mode: IngestMode) -> Result<Vec<Food>> {
    match mode {
        IngestMode::Csv => Ok(tabular::parse_foods(text)),
        IngestMode::Json => structured::parse_foods(text),
    }
}

/// Load and parse a dataset file.
///
/// This is the only suspending operation. Any failure yields an error and
/// no foods at all.
pub async fn load_dataset<P: AsRef<Path>>(path: P, mode: IngestMode) -> Result<Vec<Food>> {
    let path = path.as_ref();

    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        warn!(path = %path.display(), "dataset unreachable: {}", e);
        LookupError::Ingestion(format!("{}: {}", path.display(), e))
    })?;

    let foods = parse_dataset(&text, mode).map_err(|e| {
        warn!(path = %path.display(), "dataset malformed: {}", e);
        LookupError::Ingestion(format!("{}: {}", path.display(), e))
    })?;

    info!(path = %path.display(), ?mode, foods = foods.len(), "dataset loaded");
    Ok(foods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_mode_from_path() {
        assert_eq!(IngestMode::from_path("data/foods.json"), IngestMode::Json);
        assert_eq!(IngestMode::from_path("FOODS.JSON"), IngestMode::Json);
        assert_eq!(IngestMode::from_path("foods.csv"), IngestMode::Csv);
        assert_eq!(IngestMode::from_path("foods"), IngestMode::Csv);
    }

    #[tokio::test]
    async fn test_load_csv_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"a\nb\nc\n\"Oats\",11,7,60,375,0,0,0,\"cereal\"\n")
            .unwrap();

        let foods = load_dataset(file.path(), IngestMode::Csv).await.unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].name, "Oats");
    }

    #[tokio::test]
    async fn test_load_json_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(
            br#"[{"name": "Oats", "category": "cereal", "carbs": 60, "fat": 7, "protein": 11, "cholesterol": 0, "calories": 375}]"#,
        )
        .unwrap();

        let mode = IngestMode::from_path(file.path());
        let foods = load_dataset(file.path(), mode).await.unwrap();
        assert_eq!(foods.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_ingestion_error() {
        let err = load_dataset("/nonexistent/foods.csv", IngestMode::Csv)
            .await
            .unwrap_err();
        assert!(matches!(err, LookupError::Ingestion(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_ingestion_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not a list").unwrap();

        let err = load_dataset(file.path(), IngestMode::Json).await.unwrap_err();
        assert!(matches!(err, LookupError::Ingestion(_)));
    }
}
