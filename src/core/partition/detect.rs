//! Content-type detection

use crate::core::ingest::ContentTypeDetector;

const OCTET_STREAM: &str = "application/octet-stream";

/// Signature table checked before falling back to the filename
const SIGNATURES: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xFF\xD8\xFF", "image/jpeg"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"II*\x00", "image/tiff"),
    (b"MM\x00*", "image/tiff"),
    (b"{\\rtf", "text/rtf"),
];

/// Containers whose concrete format only the extension tells apart
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

/// Magic bytes first, then the filename extension, then a UTF-8 sniff
#[derive(Debug, Clone, Copy, Default)]
pub struct MimeDetector;

impl MimeDetector {
    pub fn new() -> Self {
        Self
    }

    fn guess_from_name(filename: &str) -> Option<String> {
        mime_guess::from_path(filename)
            .first()
            .map(|mime| mime.essence_str().to_string())
    }
}

impl ContentTypeDetector for MimeDetector {
    fn detect(&self, bytes: &[u8], filename: &str) -> String {
        if let Some((_, mime)) = SIGNATURES.iter().find(|(magic, _)| bytes.starts_with(magic)) {
            return (*mime).to_string();
        }

        let by_name = Self::guess_from_name(filename);

        if bytes.starts_with(ZIP_MAGIC) {
            return by_name.unwrap_or_else(|| "application/zip".to_string());
        }
        if bytes.starts_with(OLE_MAGIC) {
            return by_name.unwrap_or_else(|| "application/x-ole-storage".to_string());
        }

        if let Some(mime) = by_name {
            return mime;
        }

        if !bytes.is_empty() && std::str::from_utf8(bytes).is_ok() {
            return "text/plain".to_string();
        }

        OCTET_STREAM.to_string()
    }
}
