//! The MIME table is an external collaborator: static data the resolver
//! consults but never mutates. Kept as a flat table rather than a `HashMap`
//! since it only ever has eight entries.

/// Extension/content-type pairs, exactly as specified. Order is insertion
/// order; lookup is a linear scan, which is faster than hashing for a table
/// this small and keeps the data visibly in one place.
const MIME_TABLE: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("css", "text/css"),
    ("txt", "text/plain"),
    ("js", "text/javascript"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("swf", "application/x-shockwave-flash"),
];

/// Looks up the content type for an extension (without the dot). The match
/// is case-sensitive, matching the original's plain `dict.get(ext, None)`
/// lookup (`original_source/5/httpd.py:46-48`) — `.HTML` is not `.html`.
/// Returns `None` when the extension isn't in the table, which the resolver
/// surfaces as `ErrorKind::Forbidden`.
pub fn lookup(extension: &str) -> Option<&'static str> {
    MIME_TABLE
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, mime)| *mime)
}

/// The content type registered for `html`, used for the `index.html`
/// directory-index rule. Panics only if the table above is ever edited to
/// drop the `html` entry, which would be a programming error.
pub fn html_mime() -> &'static str {
    lookup("html").expect("html must be registered in the MIME table")
}
