//! Source loaders.
//!
//! Parse a byte stream into the in-memory shapes the namespace projects:
//! an ordered record list for delimited text, a [`Value`] tree for
//! structured documents. These are strict; soft loading (absorbing the
//! failure into an empty namespace) lives in
//! [`VirtualFilesystem::open`](crate::VirtualFilesystem::open).

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::Value;
use crate::vfs::LoadError;

/// Supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Delimited records with a header line.
    Csv,
    Json,
    Toml,
}

impl SourceFormat {
    /// Pick a format from the file extension (case-insensitive).
    pub fn detect(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(SourceFormat::Csv),
            Some("json") => Ok(SourceFormat::Json),
            Some("toml") => Ok(SourceFormat::Toml),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Tabular formats project to a flat namespace.
    pub fn is_tabular(&self) -> bool {
        matches!(self, SourceFormat::Csv)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Json => "json",
            SourceFormat::Toml => "toml",
        };
        f.write_str(name)
    }
}

/// Records of a tabular source, in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularData {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

/// A loaded source, before indexing.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedSource {
    Tabular(TabularData),
    Tree(Value),
}

impl LoadedSource {
    /// The empty source of the given format.
    pub fn empty(format: Option<SourceFormat>) -> Self {
        match format {
            Some(f) if f.is_tabular() => LoadedSource::Tabular(TabularData::default()),
            _ => LoadedSource::Tree(Value::empty_mapping()),
        }
    }
}

/// Read delimited records.
///
/// Rows shorter than the header are padded with empty cells; cells past
/// the last header are dropped.
pub fn read_csv<R: Read>(reader: R) -> Result<TabularData, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(String::from).collect();
    if headers.is_empty() {
        return Err(LoadError::MissingHeader);
    }

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let cells = result?;
        if cells.len() > headers.len() {
            tracing::debug!(row, extra = cells.len() - headers.len(), "dropping cells past header");
        }
        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), cells.get(i).unwrap_or("")))
            .collect();
        records.push(record);
    }

    tracing::debug!(headers = headers.len(), records = records.len(), "read csv");
    Ok(TabularData { headers, records })
}

/// Read a JSON document; key order is preserved.
pub fn read_json<R: Read>(reader: R) -> Result<Value, LoadError> {
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    Ok(Value::from(json))
}

/// Read a TOML document.
pub fn read_toml(text: &str) -> Result<Value, LoadError> {
    let table: toml::Value = toml::from_str(text)?;
    Ok(Value::from(table))
}

/// Load a source file, detecting the format unless one is given.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn load_path(path: &Path, format: Option<SourceFormat>) -> Result<LoadedSource, LoadError> {
    let format = match format {
        Some(f) => f,
        None => SourceFormat::detect(path)?,
    };
    match format {
        SourceFormat::Csv => {
            let file = std::fs::File::open(path)?;
            Ok(LoadedSource::Tabular(read_csv(std::io::BufReader::new(file))?))
        }
        SourceFormat::Json => {
            let file = std::fs::File::open(path)?;
            Ok(LoadedSource::Tree(read_json(std::io::BufReader::new(file))?))
        }
        SourceFormat::Toml => {
            let text = std::fs::read_to_string(path)?;
            Ok(LoadedSource::Tree(read_toml(&text)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_keeps_order() {
        let data = read_csv("id,name\n3,c\n1,a\n2,b\n".as_bytes()).unwrap();
        assert_eq!(data.headers, vec!["id", "name"]);
        let ids: Vec<_> = data.records.iter().map(|r| r.get("id").unwrap()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_read_csv_ragged_rows() {
        let data = read_csv("id,name,qty\n1,a\n2,b,5,extra\n".as_bytes()).unwrap();
        assert_eq!(data.records[0].get("qty"), Some(""));
        assert_eq!(data.records[1].get("qty"), Some("5"));
        assert_eq!(data.records[1].len(), 3);
    }

    #[test]
    fn test_read_csv_quoted_cells() {
        let data = read_csv("id,note\n1,\"hello, world\"\n".as_bytes()).unwrap();
        assert_eq!(data.records[0].get("note"), Some("hello, world"));
    }

    #[test]
    fn test_read_csv_empty_input() {
        let err = read_csv("".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader));
    }

    #[test]
    fn test_read_json_syntax_error() {
        let err = read_json("{\"a\": ".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(SourceFormat::detect(Path::new("rows.CSV")).unwrap(), SourceFormat::Csv);
        assert_eq!(SourceFormat::detect(Path::new("a/b.json")).unwrap(), SourceFormat::Json);
        assert_eq!(SourceFormat::detect(Path::new("c.toml")).unwrap(), SourceFormat::Toml);
        assert!(matches!(
            SourceFormat::detect(Path::new("notes.txt")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_path(&dir.path().join("gone.json"), None).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_load_path_format_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.txt");
        std::fs::write(&path, "id\n1\n").unwrap();
        let loaded = load_path(&path, Some(SourceFormat::Csv)).unwrap();
        assert!(matches!(loaded, LoadedSource::Tabular(ref t) if t.records.len() == 1));
    }
}
