//! Upload validation: media type, size ceiling, and magic-header checks.

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;

/// Media type accepted for PDF uploads.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// File extension accepted for PDF uploads, without the leading dot.
pub const PDF_EXTENSION: &str = "pdf";

/// Maximum accepted upload size: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// An uploaded document awaiting validation.
///
/// Ephemeral: exists only for the duration of one analysis call and is
/// never persisted by this crate.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    /// Raw file content.
    pub bytes: Vec<u8>,
    /// Declared media type (e.g., "application/pdf").
    pub media_type: String,
    /// Declared filename.
    pub filename: String,
}

impl UploadedDocument {
    /// Create a new uploaded document.
    pub fn new(
        bytes: impl Into<Vec<u8>>,
        media_type: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            media_type: media_type.into(),
            filename: filename.into(),
        }
    }

    /// Byte length of the upload.
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the upload carries no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Which checks to run against an upload.
///
/// Near-duplicate upload paths in the wild differ on whether they inspect
/// magic bytes or trust the declared type alone. Each combination is a named
/// variant of the same validator rather than a separate code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationPolicy {
    /// Declared media type and byte size.
    #[default]
    TypeAndSize,
    /// Declared media type, byte size, and the `%PDF-` signature.
    TypeSizeAndSignature,
    /// Filename extension and byte size; for submissions without a
    /// trustworthy declared type.
    ExtensionAndSize,
}

impl ValidationPolicy {
    /// Whether this policy inspects the magic-byte signature.
    pub fn checks_signature(&self) -> bool {
        matches!(self, ValidationPolicy::TypeSizeAndSignature)
    }
}

/// Validate an upload against a policy.
///
/// Returns `Ok(())` when the upload is accepted, or the first applicable
/// rejection: wrong media type or extension, size over [`MAX_UPLOAD_BYTES`],
/// or (signature-checking policies only) missing `%PDF-` magic bytes.
/// Reads only bytes already in memory.
///
/// # Example
/// ```
/// use docmap::validate::{validate, UploadedDocument, ValidationPolicy};
///
/// let upload = UploadedDocument::new(b"%PDF-1.7\n".to_vec(), "application/pdf", "notes.pdf");
/// assert!(validate(&upload, ValidationPolicy::TypeSizeAndSignature).is_ok());
/// ```
pub fn validate(upload: &UploadedDocument, policy: ValidationPolicy) -> Result<()> {
    match policy {
        ValidationPolicy::TypeAndSize | ValidationPolicy::TypeSizeAndSignature => {
            if upload.media_type != PDF_MEDIA_TYPE {
                return Err(Error::WrongMediaType {
                    expected: PDF_MEDIA_TYPE,
                    actual: upload.media_type.clone(),
                });
            }
        }
        ValidationPolicy::ExtensionAndSize => {
            if !has_extension(&upload.filename, PDF_EXTENSION) {
                return Err(Error::WrongExtension {
                    expected: PDF_EXTENSION,
                    filename: upload.filename.clone(),
                });
            }
        }
    }

    if upload.len() > MAX_UPLOAD_BYTES {
        return Err(Error::TooLarge {
            size: upload.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }

    if policy.checks_signature() {
        check_signature(&upload.bytes)?;
    }

    Ok(())
}

/// Check that a filename ends in the given extension, case-insensitively.
fn has_extension(filename: &str, extension: &str) -> bool {
    let suffix = format!(".{}", extension);
    filename.to_lowercase().ends_with(&suffix)
}

/// Check the first bytes against the PDF magic header.
fn check_signature(data: &[u8]) -> Result<()> {
    if data.len() < PDF_MAGIC_LEN {
        return Err(Error::BadSignature);
    }
    if &data[..PDF_MAGIC_LEN] != PDF_MAGIC {
        return Err(Error::BadSignature);
    }
    Ok(())
}

/// Check whether bytes carry the PDF magic header.
///
/// # Example
/// ```
/// use docmap::validate::is_pdf_bytes;
///
/// assert!(is_pdf_bytes(b"%PDF-1.4\n"));
/// assert!(!is_pdf_bytes(b"Not a PDF"));
/// ```
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    check_signature(data).is_ok()
}
