const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Format a byte count for display: bytes below 1 KB, one decimal KB below 1 MB, one decimal MB above.
pub fn format_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

/// Escapes text for literal insertion into markup, both as element content
/// and inside a double- or single-quoted attribute value.
///
/// Escaping is not idempotent: an already escaped `&lt;` becomes `&amp;lt;`
/// and renders as the literal text `&lt;`, never as `<`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
