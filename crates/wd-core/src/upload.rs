//! Raw uploads and the dataset kinds they feed.

use serde::Serialize;
use std::fmt;

/// Declared kind of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadKind {
    ShapefileComponent,
    Spreadsheet,
    WellLog,
}

impl UploadKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::ShapefileComponent => "shapefile_component",
            Self::Spreadsheet => "spreadsheet",
            Self::WellLog => "well_log",
        }
    }

    /// Lower-case file extensions accepted for this kind.
    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            Self::ShapefileComponent => &["shp", "shx", "dbf", "prj"],
            Self::Spreadsheet => &["xls", "xlsx"],
            Self::WellLog => &["las"],
        }
    }
}

/// Raw bytes of one uploaded file. Only lives until it has been parsed.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub kind: UploadKind,
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    pub fn new(file_name: impl Into<String>, kind: UploadKind, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            kind,
            bytes,
        }
    }

    fn base_name(&self) -> &str {
        self.file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_name)
    }

    /// Lower-case extension without the dot.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.base_name().rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// File name without directories and extension.
    pub fn stem(&self) -> &str {
        let base = self.base_name();
        match base.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => base,
        }
    }

    pub fn has_accepted_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| self.kind.accepted_extensions().contains(&ext.as_str()))
    }
}

impl fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadRequest")
            .field("file_name", &self.file_name)
            .field("kind", &self.kind)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Logical dataset a loader publishes; also the memoization namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Blocks,
    Wells,
    WellData,
    WellLog,
}

impl DatasetKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::Wells => "wells",
            Self::WellData => "well_data",
            Self::WellLog => "well_log",
        }
    }

    pub fn upload_kind(self) -> UploadKind {
        match self {
            Self::Blocks | Self::Wells => UploadKind::ShapefileComponent,
            Self::WellData => UploadKind::Spreadsheet,
            Self::WellLog => UploadKind::WellLog,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
