use percent_encoding::percent_decode_str;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Read access to the directory tree being previewed.
///
/// All served content is resolved relative to the root; paths that would
/// escape it are rejected before touching the filesystem.
#[derive(Debug, Clone)]
pub struct ContentRoot {
    root: PathBuf,
}

impl ContentRoot {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The directory this root wraps.
    pub fn dir(&self) -> &Path {
        &self.root
    }

    /// Resolve a URL path to a file path inside the root.
    ///
    /// The URL path is percent-decoded first. Returns `None` for paths
    /// containing `..` or other components that could leave the root.
    pub fn resolve(&self, url_path: &str) -> Option<PathBuf> {
        let decoded = percent_decode_str(url_path).decode_utf8_lossy();
        let relative = decoded.trim_start_matches('/');

        let mut resolved = self.root.clone();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                // ParentDir, RootDir and Prefix could all escape the root
                _ => return None,
            }
        }
        Some(resolved)
    }

    /// Read the bytes of the file a URL path points to.
    pub async fn read(&self, url_path: &str) -> io::Result<Vec<u8>> {
        let Some(path) = self.resolve(url_path) else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("path escapes content root: {url_path}"),
            ));
        };
        tokio::fs::read(path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_simple_path() {
        let root = ContentRoot::new(PathBuf::from("/srv/docs"));
        assert_eq!(
            root.resolve("/guide/intro.md"),
            Some(PathBuf::from("/srv/docs/guide/intro.md"))
        );
    }

    #[test]
    fn test_resolve_decodes_percent_encoding() {
        let root = ContentRoot::new(PathBuf::from("/srv/docs"));
        assert_eq!(
            root.resolve("/release%20notes.md"),
            Some(PathBuf::from("/srv/docs/release notes.md"))
        );
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let root = ContentRoot::new(PathBuf::from("/srv/docs"));
        assert_eq!(root.resolve("/../secret.md"), None);
        assert_eq!(root.resolve("/a/../../secret.md"), None);
        assert_eq!(root.resolve("/%2e%2e/secret.md"), None);
    }

    #[tokio::test]
    async fn test_read_existing_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("README.md"), "# Hi").expect("Failed to write file");

        let root = ContentRoot::new(dir.path().to_path_buf());
        let bytes = root.read("/README.md").await.expect("Failed to read file");
        assert_eq!(bytes, b"# Hi");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = ContentRoot::new(dir.path().to_path_buf());

        let err = root.read("/missing.md").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_read_traversal_is_not_found() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = ContentRoot::new(dir.path().to_path_buf());

        let err = root.read("/../outside.md").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
