//! Loads user-selected files into session input.

use archgo_core::Result;
use archgo_core::session::RawFile;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use std::path::Path;

/// Reads `path` into a [`RawFile`] and its `data:` URI preview.
///
/// The MIME type is guessed from the file extension.
pub fn load_attachment(path: &Path) -> Result<(RawFile, String)> {
    let bytes = std::fs::read(path)?;
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let preview = encode_data_uri(&mime_type, &bytes);
    tracing::debug!(
        "[Attachment] Loaded {} ({} bytes, {})",
        name,
        bytes.len(),
        mime_type
    );

    Ok((
        RawFile {
            name,
            mime_type,
            bytes,
        },
        preview,
    ))
}

/// Encodes bytes as `data:<mime>;base64,<payload>`.
pub fn encode_data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64_STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_encode_data_uri() {
        assert_eq!(
            encode_data_uri("image/png", &[0, 0, 0]),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_load_attachment_guesses_mime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sketch.png");
        std::fs::write(&path, [0u8, 0, 0]).unwrap();

        let (file, preview) = load_attachment(&path).unwrap();
        assert_eq!(file.name, "sketch.png");
        assert_eq!(file.mime_type, "image/png");
        assert_eq!(file.bytes, vec![0, 0, 0]);
        assert_eq!(preview, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_unknown_extension_is_octet_stream() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.zzzunknown");
        std::fs::write(&path, b"x").unwrap();

        let (file, _) = load_attachment(&path).unwrap();
        assert_eq!(file.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_attachment(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, archgo_core::ArchGoError::Io { .. }));
    }
}
