//! Content-based identity of an upload set.

use sha2::{Digest, Sha256};
use std::fmt;
use wd_core::{DatasetKind, UploadRequest};

/// SHA-256 of a dataset kind plus the content of its uploaded files.
///
/// File names do not participate apart from their extension, and the order
/// of the uploads does not matter. Uploading the same bytes twice under a new
/// name therefore yields the same identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputIdentity(String);

impl InputIdentity {
    pub fn of_uploads(kind: DatasetKind, uploads: &[UploadRequest]) -> Self {
        let mut files: Vec<(String, &[u8])> = uploads
            .iter()
            .map(|u| (u.extension().unwrap_or_default(), u.bytes.as_slice()))
            .collect();
        files.sort();

        let mut hasher = Sha256::new();
        hasher.update(kind.label().as_bytes());
        for (extension, bytes) in files {
            hasher.update([0u8]);
            hasher.update(extension.as_bytes());
            hasher.update((bytes.len() as u64).to_le_bytes());
            hasher.update(bytes);
        }

        let result = hasher.finalize();
        Self(format!("{:x}", result))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InputIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0[..12.min(self.0.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wd_core::UploadKind;

    fn upload(name: &str, bytes: &[u8]) -> UploadRequest {
        UploadRequest::new(name, UploadKind::ShapefileComponent, bytes.to_vec())
    }

    #[test]
    fn hash_stability() {
        let uploads = vec![upload("blocks.shp", b"shp"), upload("blocks.dbf", b"dbf")];
        let id1 = InputIdentity::of_uploads(DatasetKind::Blocks, &uploads);
        let id2 = InputIdentity::of_uploads(DatasetKind::Blocks, &uploads);
        assert_eq!(id1, id2);
        assert_eq!(id1.as_str().len(), 64);
    }

    #[test]
    fn upload_order_and_names_do_not_matter() {
        let a = vec![upload("blocks.shp", b"shp"), upload("blocks.dbf", b"dbf")];
        let b = vec![upload("copy.DBF", b"dbf"), upload("copy.shp", b"shp")];
        assert_eq!(
            InputIdentity::of_uploads(DatasetKind::Blocks, &a),
            InputIdentity::of_uploads(DatasetKind::Blocks, &b)
        );
    }

    #[test]
    fn hash_differs_for_different_inputs() {
        let a = vec![upload("blocks.shp", b"shp-1"), upload("blocks.dbf", b"dbf")];
        let b = vec![upload("blocks.shp", b"shp-2"), upload("blocks.dbf", b"dbf")];
        assert_ne!(
            InputIdentity::of_uploads(DatasetKind::Blocks, &a),
            InputIdentity::of_uploads(DatasetKind::Blocks, &b)
        );
        assert_ne!(
            InputIdentity::of_uploads(DatasetKind::Blocks, &a),
            InputIdentity::of_uploads(DatasetKind::Wells, &a)
        );
    }

    #[test]
    fn content_cannot_shift_between_files() {
        let a = vec![upload("x.shp", b"ab"), upload("x.dbf", b"c")];
        let b = vec![upload("x.shp", b"a"), upload("x.dbf", b"bc")];
        assert_ne!(
            InputIdentity::of_uploads(DatasetKind::Blocks, &a),
            InputIdentity::of_uploads(DatasetKind::Blocks, &b)
        );
    }
}
