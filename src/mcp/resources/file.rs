//! `file://` resource reader.

use crate::services::source_tree;
use crate::PlanMcpError;

/// Read a file, or aggregate a directory, at an absolute path.
pub async fn read_file_resource(path: &str) -> Result<String, PlanMcpError> {
    let owned = path.to_string();
    run_blocking(path, move || source_tree::read_path(&owned)).await
}

/// Aggregate a directory. Fails with `ResourceNotFound` unless `path` is a
/// directory.
pub async fn read_directory_resource(path: &str) -> Result<String, PlanMcpError> {
    let owned = path.to_string();
    run_blocking(path, move || source_tree::aggregate_directory(&owned)).await
}

async fn run_blocking<F>(path: &str, f: F) -> Result<String, PlanMcpError>
where
    F: FnOnce() -> Result<String, PlanMcpError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PlanMcpError::Io {
            path: path.to_string(),
            source: std::io::Error::other(e),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_directory_reader_rejects_files() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.py");
        std::fs::write(&file, "print(1)").unwrap();
        let file = file.display().to_string();

        assert!(read_file_resource(&file).await.unwrap().contains("print(1)"));
        let err = read_directory_resource(&file).await.unwrap_err();
        assert!(matches!(err, PlanMcpError::ResourceNotFound { .. }));
    }
}
