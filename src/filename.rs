use regex::Regex;
use std::sync::LazyLock;

const FALLBACK_BASE_NAME: &str = "document";

static PDF_EXTENSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\.pdf$").unwrap());

// Characters invalid on Windows, macOS or Linux, plus control characters.
static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).unwrap());

/// Base name of an uploaded file: no directories, no `.pdf` extension.
pub fn base_name(file_name: &str) -> String {
    let last = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let stem = PDF_EXTENSION.replace(last, "");
    let cleaned = INVALID_CHARS.replace_all(&stem, "_");
    let cleaned = cleaned.trim_matches(|c| c == ' ' || c == '.');

    if cleaned.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Name offered for the exported file, e.g. `report.pdf` -> `report-modified.pdf`.
pub fn output_file_name(file_name: &str, suffix: &str) -> String {
    format!("{}{}.pdf", base_name(file_name), suffix)
}
