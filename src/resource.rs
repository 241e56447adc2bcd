use anyhow::{Context, Result};
use std::path::Path;

/// Turn a selected local file into a session-scoped resource locator the
/// audio player can use. The locator is just the file's path; it is not
/// durable across restarts (the file may move or vanish).
pub fn file_resource(path: &Path) -> Result<String> {
    let metadata = path
        .metadata()
        .with_context(|| format!("No such file: {}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }
    Ok(path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_resource_for_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let sound = temp_dir.path().join("chime.mp3");
        std::fs::write(&sound, b"not really audio").unwrap();

        let locator = file_resource(&sound).unwrap();
        assert_eq!(locator, sound.to_string_lossy());
    }

    #[test]
    fn test_file_resource_rejects_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope.mp3");
        assert!(file_resource(&missing).is_err());
    }

    #[test]
    fn test_file_resource_rejects_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(file_resource(temp_dir.path()).is_err());
    }
}
