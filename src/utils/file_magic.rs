/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// `data` 为文件开头的若干字节，`extension` 为带点号的扩展名（如 ".pdf"）。
/// 匹配或该类型无需校验时返回 `true`。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // 图片格式
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".gif" => data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a"),
        ".webp" => data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP",

        // 文档格式
        ".pdf" => data.starts_with(b"%PDF"),
        ".doc" | ".xls" | ".ppt" => {
            // MS Office 旧格式 (OLE Compound Document)
            data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        }
        ".docx" | ".xlsx" | ".pptx" => {
            // MS Office 新格式 (ZIP-based OOXML)
            data.starts_with(&[0x50, 0x4B, 0x03, 0x04])
        }

        // 压缩格式
        ".zip" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),
        ".rar" => data.starts_with(b"Rar!"),
        ".7z" => data.starts_with(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]),
        ".gz" | ".gzip" => data.starts_with(&[0x1F, 0x8B]),

        // 文本格式 - 不检查魔术字节
        ".txt" | ".md" | ".csv" | ".json" => true,

        // 未知格式 - 默认拒绝
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));

        let jpeg_header = [0xFF, 0xD8, 0xFF, 0xE0];
        assert!(validate_magic_bytes(&jpeg_header, ".jpeg"));
    }

    #[test]
    fn test_document_magic() {
        assert!(validate_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(!validate_magic_bytes(b"%PDF-1.7", ".docx"));
        // OOXML 与 zip 共享文件头
        let zip_header = [0x50, 0x4B, 0x03, 0x04];
        assert!(validate_magic_bytes(&zip_header, ".docx"));
        assert!(validate_magic_bytes(&zip_header, ".zip"));
    }

    #[test]
    fn test_text_files_skip_check() {
        assert!(validate_magic_bytes(b"anything", ".txt"));
        assert!(validate_magic_bytes(b"# notes", ".md"));
    }

    #[test]
    fn test_empty_data_rejected() {
        assert!(!validate_magic_bytes(&[], ".png"));
        assert!(!validate_magic_bytes(&[], ".txt"));
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(!validate_magic_bytes(&[0x4D, 0x5A], ".exe"));
    }
}
