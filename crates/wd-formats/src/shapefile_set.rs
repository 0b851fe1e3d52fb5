//! Grouping of uploaded shapefile sidecar files.

use crate::error::{FormatError, FormatResult};
use wd_core::UploadRequest;

/// Borrowed view of the files that make up one shapefile.
///
/// `.shp` and `.dbf` are required; `.shx` and `.prj` are optional. Upload order
/// does not matter, files are matched by case-insensitive extension.
#[derive(Debug, Clone, Copy)]
pub struct ShapefileSet<'a> {
    pub shp: &'a [u8],
    pub dbf: &'a [u8],
    pub shx: Option<&'a [u8]>,
    pub prj: Option<&'a [u8]>,
    /// File name of the `.shp` upload.
    pub primary_name: &'a str,
}

impl<'a> ShapefileSet<'a> {
    pub fn from_uploads(uploads: &'a [UploadRequest]) -> FormatResult<Self> {
        let mut shp: Option<&'a UploadRequest> = None;
        let mut dbf = None;
        let mut shx = None;
        let mut prj = None;

        for upload in uploads {
            let ext = upload.extension().unwrap_or_default();
            let slot = match ext.as_str() {
                "shp" => &mut shp,
                "dbf" => &mut dbf,
                "shx" => &mut shx,
                "prj" => &mut prj,
                _ => {
                    return Err(FormatError::UnexpectedComponent {
                        file_name: upload.file_name.clone(),
                    });
                }
            };
            if slot.replace(upload).is_some() {
                return Err(FormatError::DuplicateComponent { extension: ext });
            }
        }

        let shp = shp.ok_or(FormatError::MissingComponent { extension: "shp" })?;
        let dbf = dbf.ok_or(FormatError::MissingComponent { extension: "dbf" })?;

        Ok(Self {
            shp: &shp.bytes,
            dbf: &dbf.bytes,
            shx: shx.map(|u| u.bytes.as_slice()),
            prj: prj.map(|u| u.bytes.as_slice()),
            primary_name: &shp.file_name,
        })
    }
}
