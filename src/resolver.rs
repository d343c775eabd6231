//! Maps a request path to a file under the document root. Containment is
//! enforced syntactically, on the URI's `.`/`..` segments, before any
//! filesystem call is made — never via `realpath` on a path that might not
//! exist.

use std::path::{Path, PathBuf};

use crate::error::ErrorKind;
use crate::mime;

/// A file the resolver found, ready for the writer to serialise.
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub length: u64,
    pub mime_type: &'static str,
}

/// Collapses `.`/`..` segments in `uri_path` and joins the remainder onto
/// `root`. A `..` that would climb above the root fails with `NotFound`
/// rather than being allowed to escape — this is the sole containment
/// check and it runs before any syscall.
fn normalize_under_root(root: &Path, uri_path: &str) -> Result<PathBuf, ErrorKind> {
    let trimmed = uri_path.strip_prefix('/').unwrap_or(uri_path);
    let mut stack: Vec<&str> = Vec::new();

    for segment in trimmed.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if stack.pop().is_none() {
                    return Err(ErrorKind::NotFound);
                }
            }
            seg => stack.push(seg),
        }
    }

    let mut candidate = root.to_path_buf();
    candidate.extend(stack);
    Ok(candidate)
}

/// The substring after the last `.` in the raw URI path, exactly as the
/// spec defines "extension" — computed on the URI, not on the resolved
/// filesystem path.
fn extension_of(uri_path: &str) -> Option<&str> {
    uri_path.rsplit_once('.').map(|(_, ext)| ext)
}

/// Resolves `uri_path` (already percent-decoded, query stripped) against
/// `root`. See `SPEC_FULL.md` §4.1 for the full step list this follows.
pub async fn resolve(root: &Path, uri_path: &str) -> Result<ResolvedFile, ErrorKind> {
    let candidate = normalize_under_root(root, uri_path)?;

    let metadata = tokio::fs::metadata(&candidate)
        .await
        .map_err(|_| ErrorKind::NotFound)?;

    if metadata.is_dir() {
        let index = candidate.join("index.html");
        let index_metadata = tokio::fs::metadata(&index)
            .await
            .map_err(|_| ErrorKind::NotFound)?;
        return Ok(ResolvedFile {
            path: index,
            length: index_metadata.len(),
            mime_type: mime::html_mime(),
        });
    }

    let extension = extension_of(uri_path).ok_or(ErrorKind::Forbidden)?;
    let mime_type = mime::lookup(extension).ok_or(ErrorKind::Forbidden)?;

    Ok(ResolvedFile {
        path: candidate,
        length: metadata.len(),
        mime_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn root_with(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            let path = dir.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, contents).unwrap();
        }
        dir
    }

    #[tokio::test]
    async fn resolves_plain_file() {
        let dir = root_with(&[("hello.html", "Hello World!")]);
        let resolved = resolve(dir.path(), "/hello.html").await.unwrap();
        assert_eq!(resolved.length, 12);
        assert_eq!(resolved.mime_type, "text/html");
    }

    #[tokio::test]
    async fn directory_style_uses_index_html() {
        let dir = root_with(&[("sub/index.html", "page.")]);
        let resolved = resolve(dir.path(), "/sub/").await.unwrap();
        assert_eq!(resolved.length, 5);
        assert_eq!(resolved.mime_type, "text/html");
    }

    #[tokio::test]
    async fn root_uri_uses_index_html() {
        let dir = root_with(&[("index.html", "home")]);
        let resolved = resolve(dir.path(), "/").await.unwrap();
        assert_eq!(resolved.length, 4);
    }

    #[tokio::test]
    async fn directory_without_index_is_not_found() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        let err = resolve(dir.path(), "/empty/").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = resolve(dir.path(), "/missing.html").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn unregistered_extension_on_existing_file_is_forbidden() {
        let dir = root_with(&[("hello.exe", "MZ")]);
        let err = resolve(dir.path(), "/hello.exe").await.unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn uppercase_extension_on_existing_file_is_forbidden() {
        // Matches the original's plain dict lookup: "HTML" is not "html".
        let dir = root_with(&[("hello.HTML", "Hello World!")]);
        let err = resolve(dir.path(), "/hello.HTML").await.unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn traversal_above_root_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = resolve(dir.path(), "/../etc/passwd").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn nested_traversal_back_to_a_sibling_is_allowed() {
        // "/a/../b.html" normalises to "/b.html", which is still under root.
        let dir = root_with(&[("b.html", "ok")]);
        let resolved = resolve(dir.path(), "/a/../b.html").await.unwrap();
        assert_eq!(resolved.length, 2);
    }

    #[test]
    fn extension_is_taken_from_the_whole_uri_path() {
        assert_eq!(extension_of("/hello.html"), Some("html"));
        assert_eq!(extension_of("/no-extension"), None);
        assert_eq!(extension_of("/trailing."), Some(""));
    }
}
