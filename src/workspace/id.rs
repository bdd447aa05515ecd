//! Stable workspace identifiers
//!
//! A workspace id is derived only from the descriptor's path string, so the same
//! file keeps its favorites and recents across rescans, restarts and machines.

/// Compute the identifier for a descriptor path
///
/// Formula: MD5(path), formatted as a version-3 UUID
///
/// # Example
/// ```
/// use code_workspaces::workspace::id::workspace_id;
///
/// let id = workspace_id("/Users/x/proj/app.code-workspace");
/// assert_eq!(id, "79afb2ef-c483-31f3-92a8-3dd12ec4be28");
/// ```
pub fn workspace_id(path: &str) -> String {
    let digest = md5::compute(path.as_bytes());
    uuid::Builder::from_md5_bytes(digest.0)
        .into_uuid()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_id() {
        assert_eq!(
            workspace_id("/home/user/work/demo.code-workspace"),
            "9bf0ce2a-ca6b-3fff-accd-c471bde58893"
        );
    }

    #[test]
    fn test_id_is_stable() {
        let path = "/Users/x/proj/app.code-workspace";
        assert_eq!(workspace_id(path), workspace_id(path));
    }

    #[test]
    fn test_distinct_paths_distinct_ids() {
        let a = workspace_id("/Users/x/a.code-workspace");
        let b = workspace_id("/Users/x/b.code-workspace");
        let nested = workspace_id("/Users/x/a/a.code-workspace");
        assert_ne!(a, b);
        assert_ne!(a, nested);
    }

    #[test]
    fn test_id_shape() {
        let id = workspace_id("/tmp/x.code-workspace");
        assert_eq!(id.len(), 36);
        // Version nibble
        assert_eq!(&id[14..15], "3");
    }
}
