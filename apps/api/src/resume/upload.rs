//! Multipart form reading for resume uploads.

use axum::extract::multipart::{Multipart, MultipartError};
use bytes::Bytes;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// An uploaded file, kept as raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Decodes the file as UTF-8 text. Invalid sequences become U+FFFD and a
    /// leading byte order mark is dropped. No format-specific parsing happens,
    /// so a PDF or DOC upload yields its raw bytes decoded as text.
    pub fn text(&self) -> String {
        let bytes = self.bytes.strip_prefix(UTF8_BOM).unwrap_or(&self.bytes[..]);
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// The two fields the upload handler cares about. Either may be absent.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub user_id: Option<String>,
}

/// Reads every field of the form. `file` and `userId` are captured; anything
/// else is drained and dropped. A repeated field keeps its first value.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, MultipartError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                if form.file.is_none() {
                    form.file = Some(UploadedFile { file_name, bytes });
                }
            }
            Some("userId") => {
                let value = field.text().await?;
                if form.user_id.is_none() {
                    form.user_id = Some(value);
                }
            }
            _ => {
                field.bytes().await?;
            }
        }
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(bytes: &'static [u8]) -> UploadedFile {
        UploadedFile {
            file_name: Some("resume.txt".to_string()),
            bytes: Bytes::from_static(bytes),
        }
    }

    #[test]
    fn test_text_passes_utf8_through_verbatim() {
        let upload = file("# Jane Doe\n\n- Rust, Go\n".as_bytes());
        assert_eq!(upload.text(), "# Jane Doe\n\n- Rust, Go\n");
    }

    #[test]
    fn test_text_strips_byte_order_mark() {
        let upload = file(b"\xEF\xBB\xBFhello");
        assert_eq!(upload.text(), "hello");
    }

    #[test]
    fn test_text_replaces_invalid_sequences() {
        let upload = file(b"ok \xFF end");
        assert_eq!(upload.text(), "ok \u{FFFD} end");
    }
}
