//! Suggested file names from `Content-Disposition` headers.

/// Extract the file name from a `Content-Disposition` value.
///
/// Takes the first `filename=` or `filename*=` parameter, skipping an
/// optional `UTF-8''` charset prefix and an opening quote. The value runs
/// up to the next `;` or quote and is percent-decoded; a value that does
/// not decode is returned as written.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let lowered = header.to_ascii_lowercase();
    let mut search_from = 0;

    while let Some(found) = lowered[search_from..].find("filename") {
        let start = search_from + found;
        search_from = start + "filename".len();
        if let Some(raw) = parameter_value(header, &lowered, search_from) {
            return Some(match urlencoding::decode(raw) {
                Ok(decoded) => decoded.into_owned(),
                Err(_) => raw.to_string(),
            });
        }
    }
    None
}

fn parameter_value<'a>(header: &'a str, lowered: &str, mut pos: usize) -> Option<&'a str> {
    let bytes = lowered.as_bytes();
    if bytes.get(pos) == Some(&b'*') {
        pos += 1;
    }
    if bytes.get(pos) != Some(&b'=') {
        return None;
    }
    pos += 1;
    if lowered[pos..].starts_with("utf-8''") {
        pos += "utf-8''".len();
    }
    if matches!(bytes.get(pos), Some(b'"' | b'\'')) {
        pos += 1;
    }

    let rest = &header[pos..];
    let end = rest.find([';', '"', '\'']).unwrap_or(rest.len());
    let value = &rest[..end];
    (!value.is_empty()).then_some(value)
}

/// File name for a download, falling back to `file-{id}`.
pub fn download_name(header: Option<&str>, id: impl std::fmt::Display) -> String {
    header
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| format!("file-{id}"))
}
