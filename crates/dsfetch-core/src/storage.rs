//! Persisting an accepted payload.
//!
//! Bytes go to `<name>.part` first, are fsynced, then renamed over the final
//! path, so an interrupted run never leaves a truncated file under the final
//! name.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::fetcher::FetchedPayload;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `data.csv` → `data.csv.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Write `payload` to `final_path`, replacing any existing file. Returns bytes written.
pub fn persist(payload: &FetchedPayload, final_path: &Path) -> Result<u64> {
    if let Some(parent) = final_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }

    let tp = temp_path(final_path);
    let finalized = write_synced(&tp, &payload.bytes).and_then(|()| {
        std::fs::rename(&tp, final_path).with_context(|| {
            format!("rename {} -> {}", tp.display(), final_path.display())
        })
    });
    if let Err(e) = finalized {
        if tp.exists() {
            let _ = std::fs::remove_file(&tp);
        }
        return Err(e);
    }
    tracing::info!(
        bytes = payload.len(),
        "saved {} to {}",
        payload.url,
        final_path.display()
    );
    Ok(payload.len() as u64)
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    f.write_all(bytes)
        .with_context(|| format!("write {}", path.display()))?;
    f.sync_all()
        .with_context(|| format!("sync {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::Evidence;

    fn payload(bytes: &[u8]) -> FetchedPayload {
        FetchedPayload {
            url: "https://h/a.csv".to_string(),
            content_type: Some("text/csv".to_string()),
            bytes: bytes.to_vec(),
            evidence: Evidence::ContentType,
        }
    }

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("data_raw.csv"));
        assert_eq!(p.to_string_lossy(), "data_raw.csv.part");
        let p2 = temp_path(Path::new("/tmp/out/a.csv"));
        assert_eq!(p2.to_string_lossy(), "/tmp/out/a.csv.part");
    }

    #[test]
    fn persist_writes_and_removes_temp() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("nested").join("data_raw.csv");
        let n = persist(&payload(b"a,b\n1,2\n"), &final_path).unwrap();
        assert_eq!(n, 8);
        assert_eq!(std::fs::read(&final_path).unwrap(), b"a,b\n1,2\n");
        assert!(!temp_path(&final_path).exists());
    }

    #[test]
    fn persist_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("data_raw.csv");
        std::fs::write(&final_path, b"old contents that are longer").unwrap();
        persist(&payload(b"new"), &final_path).unwrap();
        assert_eq!(std::fs::read(&final_path).unwrap(), b"new");
    }

    #[test]
    fn failed_persist_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory sits where the file should go, so the rename fails.
        let final_path = dir.path().join("data_raw.csv");
        std::fs::create_dir(&final_path).unwrap();
        std::fs::write(final_path.join("keep"), b"x").unwrap();

        assert!(persist(&payload(b"a,b\n"), &final_path).is_err());
        assert!(!temp_path(&final_path).exists());
        assert!(final_path.join("keep").exists());
    }
}
