//! Best-effort text extraction from heterogeneous file formats
//!
//! Every branch degrades to a bracketed placeholder instead of failing, so
//! one unreadable file never aborts an upload batch. Each format heuristic
//! keeps the same `(&[u8]) -> Option<String>` shape; a real parser can
//! replace any of them without touching the dispatch.

use once_cell::sync::Lazy;
use regex::Regex;

use super::UploadedFile;

/// Extensions decoded verbatim as text
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "markdown", "rst", "log", "csv", "tsv",
    // Source code
    "js", "ts", "jsx", "tsx", "py", "java", "c", "cpp", "h", "hpp", "cs", "go", "rs", "rb",
    "php", "swift", "kt", "scala", "r",
    // Markup and styles
    "html", "htm", "css", "scss", "sass", "less", "xml",
    // Config
    "yaml", "yml", "toml", "ini", "cfg", "conf",
    // Shell
    "sh", "bash", "zsh", "ps1", "bat", "cmd",
    // Query languages
    "sql", "graphql", "gql",
];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "svg"];
const MEDIA_EXTENSIONS: &[&str] = &["mp3", "mp4", "avi", "mov", "wav", "ogg", "webm"];

static PDF_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]*)\)").unwrap());
static DOCX_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:t[^>]*>([^<]*)</w:t>").unwrap());
static XLSX_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"<t[^>]*>([^<]*)</t>").unwrap());
static RTF_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]*\}").unwrap());
static RTF_CONTROL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[a-z]+\d*").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Multi-format text extractor
pub struct TextExtractor;

impl TextExtractor {
    /// Convert a raw file into plain text. Total: undecodable content
    /// yields a descriptive placeholder, never an error.
    pub fn extract(file: &UploadedFile) -> String {
        let ext = file_extension(&file.name);
        let media_type = file.declared_type();

        // Plain text and source files: decode verbatim
        if media_type.starts_with("text/") || TEXT_EXTENSIONS.contains(&ext.as_str()) {
            return String::from_utf8_lossy(&file.data).into_owned();
        }

        // JSON: re-serialize pretty-printed, raw text on parse failure
        if ext == "json" || media_type == "application/json" {
            let text = String::from_utf8_lossy(&file.data).into_owned();
            return match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(text),
                Err(_) => text,
            };
        }

        // PDF: literal-string heuristic with a printable-ASCII fallback
        if ext == "pdf" || media_type == "application/pdf" {
            return Self::extract_pdf(&file.data).unwrap_or_else(|| {
                format!(
                    "[PDF file: {} - Text extraction limited. Consider using a text-based format for better results.]",
                    file.name
                )
            });
        }

        // Word documents: XML text-run heuristic
        if ext == "doc"
            || ext == "docx"
            || media_type.contains("word")
            || media_type.contains("document")
        {
            return Self::extract_docx(&file.data).unwrap_or_else(|| {
                format!(
                    "[Word document: {} - Text extraction limited. Consider saving as .txt for better results.]",
                    file.name
                )
            });
        }

        // Spreadsheets: generic XML cell heuristic
        if ext == "xls" || ext == "xlsx" || media_type.contains("spreadsheet") {
            return Self::extract_xlsx(&file.data)
                .unwrap_or_else(|| format!("[Excel file: {}]", file.name));
        }

        // Rich text: strip groups and control words
        if ext == "rtf" {
            return Self::extract_rtf(&file.data)
                .unwrap_or_else(|| format!("[RTF file: {}]", file.name));
        }

        // Images and audio/video: metadata placeholder only
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            return format!(
                "[Image file: {}, Size: {:.2} KB, Type: {}]",
                file.name,
                file.data.len() as f64 / 1024.0,
                media_type
            );
        }
        if MEDIA_EXTENSIONS.contains(&ext.as_str()) {
            return format!(
                "[Media file: {}, Size: {:.2} MB, Type: {}]",
                file.name,
                file.data.len() as f64 / 1024.0 / 1024.0,
                media_type
            );
        }

        // Anything else: keep it if it is mostly printable ASCII,
        // otherwise fall back to a truncated printable preview.
        Self::extract_unknown(file, &media_type)
    }

    /// PDF literal-string tokens: parenthesized substrings containing at
    /// least one alphanumeric character, joined by spaces.
    fn extract_pdf(data: &[u8]) -> Option<String> {
        let raw = String::from_utf8_lossy(data);

        let text = PDF_LITERAL
            .captures_iter(&raw)
            .map(|c| c[1].to_string())
            .filter(|t| !t.is_empty() && t.chars().any(|ch| ch.is_ascii_alphanumeric()))
            .collect::<Vec<_>>()
            .join(" ");

        if text.len() >= 50 {
            return Some(text);
        }

        // Too little recovered: strip everything non-printable and
        // collapse whitespace.
        let stripped: String = raw
            .chars()
            .map(|ch| {
                if ('\x20'..='\x7e').contains(&ch) || ch == '\n' {
                    ch
                } else {
                    ' '
                }
            })
            .collect();
        let collapsed = WHITESPACE.replace_all(&stripped, " ").trim().to_string();

        if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        }
    }

    /// Word XML text runs, markup stripped, joined by spaces
    fn extract_docx(data: &[u8]) -> Option<String> {
        let raw = String::from_utf8_lossy(data);

        let text = DOCX_RUN
            .captures_iter(&raw)
            .map(|c| c[1].to_string())
            .collect::<Vec<_>>()
            .join(" ");

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Generic XML text cells, joined with a column separator
    fn extract_xlsx(data: &[u8]) -> Option<String> {
        let raw = String::from_utf8_lossy(data);

        let text = XLSX_CELL
            .captures_iter(&raw)
            .map(|c| c[1].to_string())
            .collect::<Vec<_>>()
            .join(" | ");

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// RTF with brace-delimited groups and control words removed
    fn extract_rtf(data: &[u8]) -> Option<String> {
        let raw = String::from_utf8_lossy(data);
        let without_groups = RTF_GROUP.replace_all(&raw, "");
        let text = RTF_CONTROL
            .replace_all(&without_groups, " ")
            .trim()
            .to_string();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Fallback for undeclared formats: accept mostly-printable text,
    /// otherwise return a truncated printable preview or a size placeholder.
    fn extract_unknown(file: &UploadedFile, media_type: &str) -> String {
        let text = String::from_utf8_lossy(&file.data).into_owned();

        let readable: String = text
            .chars()
            .filter(|ch| ('\x20'..='\x7e').contains(ch) || matches!(ch, '\n' | '\r' | '\t'))
            .collect();

        let total = text.chars().count();
        let kept = readable.chars().count();

        if total > 0 && kept as f64 > total as f64 * 0.7 {
            return text;
        }

        if readable.trim().is_empty() {
            return format!(
                "[Binary file: {}, Size: {:.2} KB, Type: {}]",
                file.name,
                file.data.len() as f64 / 1024.0,
                if media_type.is_empty() { "unknown" } else { media_type }
            );
        }

        let preview: String = readable.chars().take(5000).collect();
        format!("[File: {}]\n{}", file.name, preview)
    }
}

/// Lowercased extension of a file name, empty when absent
pub fn file_extension(name: &str) -> String {
    let lower = name.to_lowercase();
    match lower.rsplit_once('.') {
        Some((_, ext)) => ext.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, media_type: Option<&str>, data: &[u8]) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            media_type: media_type.map(|s| s.to_string()),
            data: data.to_vec(),
        }
    }

    #[test]
    fn plain_text_is_decoded_verbatim() {
        let f = file("greeting.txt", Some("text/plain"), b"hello");
        assert_eq!(TextExtractor::extract(&f), "hello");
    }

    #[test]
    fn json_is_pretty_printed() {
        let f = file("data.json", None, b"{\"a\":1}");
        assert_eq!(TextExtractor::extract(&f), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn malformed_json_falls_back_to_raw_text() {
        let f = file("data.json", None, b"{not json");
        assert_eq!(TextExtractor::extract(&f), "{not json");
    }

    #[test]
    fn pdf_literal_strings_are_collected() {
        let body = b"%PDF-1.4 BT (The quick brown fox jumps over the lazy dog) Tj (and keeps running every day) Tj ET";
        let f = file("doc.pdf", Some("application/pdf"), body);
        let text = TextExtractor::extract(&f);
        assert!(text.contains("The quick brown fox jumps over the lazy dog"));
        assert!(text.contains("and keeps running every day"));
    }

    #[test]
    fn pdf_without_literals_uses_printable_fallback() {
        let mut body = vec![0u8, 1, 2, 3];
        body.extend_from_slice(b"Some recoverable words here");
        body.extend_from_slice(&[0xff, 0xfe]);
        let f = file("doc.pdf", None, &body);
        let text = TextExtractor::extract(&f);
        assert!(text.contains("Some recoverable words here"));
    }

    #[test]
    fn empty_pdf_yields_placeholder() {
        let f = file("scan.pdf", None, &[0u8, 1, 2, 3]);
        let text = TextExtractor::extract(&f);
        assert!(text.starts_with("[PDF file: scan.pdf"));
    }

    #[test]
    fn docx_text_runs_are_joined() {
        let body = b"<w:p><w:t>Hello</w:t><w:t xml:space=\"preserve\">world</w:t></w:p>";
        let f = file("memo.docx", None, body);
        assert_eq!(TextExtractor::extract(&f), "Hello world");
    }

    #[test]
    fn docx_without_runs_yields_placeholder() {
        let f = file("memo.docx", None, &[0x50, 0x4b, 0x03, 0x04]);
        assert!(TextExtractor::extract(&f).starts_with("[Word document: memo.docx"));
    }

    #[test]
    fn xlsx_cells_are_pipe_separated() {
        let body = b"<t>Name</t><t>Amount</t><t>Total</t>";
        let f = file("sheet.xlsx", None, body);
        assert_eq!(TextExtractor::extract(&f), "Name | Amount | Total");
    }

    #[test]
    fn rtf_markup_is_stripped() {
        let body = b"{\\fonttbl\\f0 Arial;}\\b Bold words\\b0 plain";
        let f = file("note.rtf", None, body);
        let text = TextExtractor::extract(&f);
        assert!(text.contains("Bold words"));
        assert!(!text.contains('\\'));
        assert!(!text.contains('{'));
    }

    #[test]
    fn image_yields_metadata_placeholder() {
        let data = vec![0u8; 2048];
        let f = file("photo.png", Some("image/png"), &data);
        let text = TextExtractor::extract(&f);
        assert!(text.contains("photo.png"));
        assert!(text.contains("2.00 KB"));
        assert!(text.contains("image/png"));
        assert!(!text.contains('\0'));
    }

    #[test]
    fn media_placeholder_reports_megabytes() {
        let data = vec![0u8; 3 * 1024 * 1024];
        let f = file("clip.mp4", Some("video/mp4"), &data);
        let text = TextExtractor::extract(&f);
        assert!(text.starts_with("[Media file: clip.mp4"));
        assert!(text.contains("3.00 MB"));
    }

    #[test]
    fn mostly_printable_unknown_files_pass_through() {
        let f = file("README", None, b"just some readable notes\nwith lines");
        assert_eq!(
            TextExtractor::extract(&f),
            "just some readable notes\nwith lines"
        );
    }

    #[test]
    fn mostly_binary_unknown_files_get_a_preview() {
        let mut data = vec![0u8; 200];
        data.extend_from_slice(b"salvageable");
        let f = file("blob.dat", None, &data);
        let text = TextExtractor::extract(&f);
        assert!(text.starts_with("[File: blob.dat]\n"));
        assert!(text.contains("salvageable"));
    }

    #[test]
    fn fully_binary_unknown_files_get_a_size_placeholder() {
        let data = vec![0u8; 1024];
        let f = file("blob.bin", None, &data);
        let text = TextExtractor::extract(&f);
        assert!(text.starts_with("[Binary file: blob.bin"));
        assert!(text.contains("1.00 KB"));
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(file_extension("Report.PDF"), "pdf");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("noext"), "");
    }
}
