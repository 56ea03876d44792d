use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ManifestError;
use crate::types::{ManifestName, ProjectType};

pub const URL_COLUMN: &str = "url";
pub const DESTINATION_COLUMN: &str = "GSTT_dir";
/// Accepted headers for the category discriminator
pub const CATEGORY_COLUMNS: [&str; 2] = ["type", "destination_category"];

/// One row of a manifest table. Unknown columns are ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ManifestRow {
    #[serde(alias = "Url", alias = "URL")]
    pub url: String,

    /// `RPKM`, `coverage`, `FH_PRS`, `sompy`, `Results`
    #[serde(default, rename = "type", alias = "destination_category")]
    pub category: Option<String>,

    /// Raw `GSTT_dir` cell: a single template or a list literal of templates
    #[serde(default, rename = "GSTT_dir")]
    pub destination: Option<String>,

    #[serde(default)]
    pub subdir: Option<String>,

    /// Parsed from `destination`
    #[serde(skip)]
    pub destination_templates: Vec<String>,
}

/// A manifest table loaded from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub path: PathBuf,
    pub rows: Vec<ManifestRow>,
    pub has_category_column: bool,
    /// The table carries per-row destination templates
    pub has_destination_column: bool,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ManifestError::Unreadable { path: path.display().to_string(), source })?;
        Self::from_csv_str(path, &content)
    }

    pub fn from_csv_str(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let path_str = path.display().to_string();
        let malformed = |source| ManifestError::Malformed { path: path_str.clone(), source };

        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(content.as_bytes());
        let headers = reader.headers().map_err(malformed)?.clone();

        if !headers.iter().any(|h| h.eq_ignore_ascii_case(URL_COLUMN)) {
            return Err(ManifestError::MissingColumn { path: path_str.clone(), column: URL_COLUMN.to_string() });
        }
        let has_category_column = headers.iter().any(|h| CATEGORY_COLUMNS.contains(&h));
        let has_destination_column = headers.iter().any(|h| h == DESTINATION_COLUMN);

        let mut rows = Vec::new();
        for (index, record) in reader.deserialize::<ManifestRow>().enumerate() {
            let mut row = record.map_err(malformed)?;
            if has_destination_column {
                // Every row of a templated manifest needs at least one destination
                let value = row.destination.as_deref().unwrap_or_default();
                row.destination_templates = parse_destination_list(value)
                    .filter(|templates| !templates.is_empty() && templates.iter().all(|t| !t.trim().is_empty()))
                    .ok_or_else(|| ManifestError::MalformedDestinationList {
                        path: path_str.clone(),
                        row: index + 1,
                        value: value.to_string(),
                    })?;
            }
            rows.push(row);
        }

        debug!(manifest = %path_str, rows = rows.len(), has_category_column, has_destination_column, "Loaded manifest");
        Ok(Self { path: path.to_path_buf(), rows, has_category_column, has_destination_column })
    }

    /// Fails unless the table carries a category column, for layouts that route rows by category
    pub fn require_category_column(&self) -> Result<(), ManifestError> {
        if self.has_category_column {
            return Ok(());
        }
        Err(ManifestError::MissingColumn {
            path: self.path.display().to_string(),
            column: CATEGORY_COLUMNS.join(" or "),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose category matches exactly, in manifest order
    pub fn rows_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ManifestRow> + 'a {
        self.rows.iter().filter(move |row| row.category.as_deref() == Some(category))
    }
}

/// Parses a destination cell. `['a', "b"]` gives two templates, a bare value gives one.
/// Returns `None` for a list literal that is not a flat list of quoted strings.
pub fn parse_destination_list(value: &str) -> Option<Vec<String>> {
    let value = value.trim();
    let Some(inner) = value.strip_prefix('[') else {
        return Some(vec![value.to_string()]);
    };
    let inner = inner.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return Some(Vec::new());
    }

    inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let quote = item.chars().next()?;
            if quote != '\'' && quote != '"' {
                return None;
            }
            item.strip_prefix(quote)?.strip_suffix(quote).map(str::to_string)
        })
        .collect()
}

/// Finds manifests in `folder`, grouped by project. Files whose names carry no
/// known project token are skipped with a warning.
pub fn discover_manifests(folder: &Path) -> Result<BTreeMap<ProjectType, Vec<PathBuf>>, ManifestError> {
    let entries = std::fs::read_dir(folder)
        .map_err(|source| ManifestError::Unreadable { path: folder.display().to_string(), source })?;

    let mut grouped: BTreeMap<ProjectType, Vec<PathBuf>> = BTreeMap::new();
    for entry in entries {
        let path = entry.map_err(|source| ManifestError::Unreadable { path: folder.display().to_string(), source })?.path();
        let is_csv = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !path.is_file() || !is_csv {
            continue;
        }
        match ManifestName::from_path(&path) {
            Ok(name) => grouped.entry(name.project).or_default().push(path),
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping file that is not a recognised manifest"),
        }
    }

    for paths in grouped.values_mut() {
        paths.sort();
    }
    Ok(grouped)
}
