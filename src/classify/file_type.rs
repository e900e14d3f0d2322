//! File type resolution for results.

use crate::core::FileDescriptor;

/// Extension table consulted when no MIME type was declared. Matched by
/// suffix, in order.
const EXTENSION_TYPES: [(&str, &str); 18] = [
    (".txt", "text/plain"),
    (".pdf", "application/pdf"),
    (".doc", "application/msword"),
    (
        ".docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    (".xls", "application/vnd.ms-excel"),
    (
        ".xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".png", "image/png"),
    (".gif", "image/gif"),
    (".mp4", "video/mp4"),
    (".mp3", "audio/mpeg"),
    (".zip", "application/zip"),
    (".exe", "application/x-msdownload"),
    (".bat", "application/x-bat"),
    (".js", "application/javascript"),
    (".html", "text/html"),
    (".css", "text/css"),
];

/// Fallback when nothing else identifies the file.
pub const UNKNOWN_FILE_TYPE: &str = "Unknown";

/// Resolves the type shown for a file.
///
/// Order: declared MIME type, extension table, the bare extension, then
/// [`UNKNOWN_FILE_TYPE`].
pub fn resolve_file_type(file: &FileDescriptor) -> String {
    if let Some(declared) = file.declared_type() {
        return declared.to_string();
    }

    let name = file.lowercase_name();
    if let Some((_, mime)) = EXTENSION_TYPES.iter().find(|(ext, _)| name.ends_with(ext)) {
        return (*mime).to_string();
    }

    file.extension()
        .unwrap_or_else(|| UNKNOWN_FILE_TYPE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_wins() {
        let file = FileDescriptor::new("report.txt", 1).with_declared_type("application/x-custom");
        assert_eq!(resolve_file_type(&file), "application/x-custom");
    }

    #[test]
    fn test_empty_declared_type_falls_through() {
        let file = FileDescriptor::new("report.TXT", 1).with_declared_type("");
        assert_eq!(resolve_file_type(&file), "text/plain");
    }

    #[test]
    fn test_extension_table() {
        let cases = [
            ("setup.exe", "application/x-msdownload"),
            ("thesis.docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
            ("photo.JPEG", "image/jpeg"),
            ("app.js", "application/javascript"),
        ];
        for (name, expected) in cases {
            assert_eq!(resolve_file_type(&FileDescriptor::new(name, 1)), expected, "{name}");
        }
    }

    #[test]
    fn test_unlisted_extension_is_returned_verbatim() {
        assert_eq!(resolve_file_type(&FileDescriptor::new("data.Parquet", 1)), ".parquet");
    }

    #[test]
    fn test_no_extension_is_unknown() {
        assert_eq!(resolve_file_type(&FileDescriptor::new("Makefile", 1)), UNKNOWN_FILE_TYPE);
    }
}
