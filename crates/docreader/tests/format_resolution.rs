//! Filename to format resolution.

use docreader::core::formats::{IMAGE_EXTENSIONS, ImageFormat, SUPPORTED_EXTENSIONS};
use docreader::{SupportedFormat, resolve_file_type};

#[test]
fn test_every_supported_extension_resolves_case_insensitively() {
    for extension in SUPPORTED_EXTENSIONS {
        for name in [
            format!("file.{}", extension),
            format!("FILE.{}", extension.to_uppercase()),
            format!("Mixed.Name.{}", extension),
        ] {
            let format = SupportedFormat::from_filename(Some(&name))
                .unwrap_or_else(|| panic!("{} should resolve", name));
            assert_eq!(format.extension(), *extension);
        }
    }
}

#[test]
fn test_image_family() {
    for extension in IMAGE_EXTENSIONS {
        let format = SupportedFormat::from_file_type(extension).unwrap();
        assert!(format.is_image(), "{} should be an image", extension);
        assert_eq!(format.to_string(), "image");
    }

    assert_eq!(
        SupportedFormat::from_file_type("jpeg"),
        Some(SupportedFormat::Image(ImageFormat::Jpeg))
    );
}

#[test]
fn test_document_families() {
    assert_eq!(SupportedFormat::from_file_type("pdf"), Some(SupportedFormat::Pdf));
    assert_eq!(SupportedFormat::from_file_type("docx"), Some(SupportedFormat::Docx));
    assert_eq!(SupportedFormat::from_file_type("txt"), Some(SupportedFormat::Txt));
}

#[test]
fn test_unsupported_names() {
    for name in ["notes", "archive.zip", "legacy.doc", "scan.tif", "report.pdf.bak", "trailing."] {
        assert_eq!(SupportedFormat::from_filename(Some(name)), None, "{}", name);
    }
    assert_eq!(SupportedFormat::from_filename(None), None);
}

#[test]
fn test_resolve_takes_last_segment() {
    assert_eq!(resolve_file_type(Some("archive.tar.gz")), "gz");
    assert_eq!(resolve_file_type(Some(".txt")), "txt");
    assert_eq!(resolve_file_type(Some("noext")), "");
    assert_eq!(resolve_file_type(None), "");
}
