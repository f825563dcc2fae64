/// Cleans a column header exported from a spreadsheet.
///
/// Excel exports prefix the first header with a BOM and Chinese text often
/// carries zero-width or full-width spaces; none of those belong in a field name.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}', '\u{3000}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn is_name_header(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "name" | "school" | "school_name" | "学校名称"
    )
}
