//! Structural checks on uploaded shapefile bundles.
//!
//! Only entry names are inspected; file contents are left to the importer.

use axum::http::StatusCode;
use std::io::Cursor;
use thiserror::Error;
use zip::ZipArchive;

/// Suffix identifying the geometry file of a bundle.
pub const SHAPEFILE_EXTENSION: &str = ".shp";

/// Companion tokens, in the order they are checked.
pub const REQUIRED_COMPANIONS: [&str; 4] = ["shp", "prj", "dbf", "shx"];

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Invalid ZIP! The file could not be read as a ZIP archive. ({0})")]
    InvalidArchive(String),

    #[error("Invalid ZIP! Not found a ShapeFile (.shp) inside the ZIP.")]
    ShapefileNotFound,

    #[error("Invalid ZIP! Not found a ShapeFile ({extension}) inside the ZIP.")]
    MissingCompanion { extension: String },
}

/// Outcome of [`check_required_companions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionCheck {
    pub status: StatusCode,
    /// Extension of the last missing token, `""` when nothing is missing.
    pub extension: String,
    /// Every missing token, in evaluation order.
    pub missing: Vec<&'static str>,
}

impl CompanionCheck {
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Empty on success.
    pub fn message(&self) -> String {
        if self.is_ok() {
            String::new()
        } else {
            format!(
                "Invalid ZIP! Not found a ShapeFile ({}) inside the ZIP.",
                self.extension
            )
        }
    }

    pub fn into_result(self) -> Result<(), ArchiveError> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(ArchiveError::MissingCompanion {
                extension: self.extension,
            })
        }
    }
}

/// Read the entry names of a ZIP archive held in memory, in central
/// directory order.
pub fn list_entry_names(bytes: &[u8]) -> Result<Vec<String>, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(invalid_archive)?;

    (0..archive.len())
        .map(|i| {
            archive
                .by_index_raw(i)
                .map(|entry| entry.name().to_string())
                .map_err(invalid_archive)
        })
        .collect()
}

fn invalid_archive(e: zip::result::ZipError) -> ArchiveError {
    ArchiveError::InvalidArchive(e.to_string())
}

pub fn contains_shapefile<S: AsRef<str>>(names: &[S]) -> bool {
    names
        .iter()
        .any(|name| name.as_ref().ends_with(SHAPEFILE_EXTENSION))
}

/// First entry whose name ends with `.shp`.
pub fn find_shapefile_name<S: AsRef<str>>(names: &[S]) -> Result<&str, ArchiveError> {
    names
        .iter()
        .map(|name| name.as_ref())
        .find(|name| name.ends_with(SHAPEFILE_EXTENSION))
        .ok_or(ArchiveError::ShapefileNotFound)
}

/// A token counts as present when any entry name contains it anywhere, so
/// `"ashp.txt"` satisfies `shp`. Every token is checked; a later missing
/// token overwrites the reported extension of an earlier one.
pub fn check_required_companions<S: AsRef<str>>(names: &[S]) -> CompanionCheck {
    let mut check = CompanionCheck {
        status: StatusCode::OK,
        extension: String::new(),
        missing: Vec::new(),
    };

    for token in REQUIRED_COMPANIONS {
        if !names.iter().any(|name| name.as_ref().contains(token)) {
            check.status = StatusCode::NOT_FOUND;
            check.extension = format!(".{}", token);
            check.missing.push(token);
        }
    }

    check
}

/// Companion check followed by the shapefile lookup; returns the `.shp` name.
pub fn validate_bundle<S: AsRef<str>>(names: &[S]) -> Result<&str, ArchiveError> {
    let check = check_required_companions(names);
    if !check.is_ok() {
        tracing::debug!(missing = ?check.missing, "Shapefile bundle rejected");
    }
    check.into_result()?;

    find_shapefile_name(names)
}
