use std::fs;
use std::path::Path;

use anyhow::Context;

pub fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir: {}", parent.display()))?;
    }
    Ok(())
}

/// Writes `bytes` next to `dst` and renames it into place, so readers never
/// see a truncated file.
pub fn write_atomic(dst: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    ensure_parent_dir(dst)?;

    let tmp = dst.with_extension("tmp");
    fs::write(&tmp, bytes).with_context(|| format!("failed to write temp: {}", tmp.display()))?;
    replace_file(&tmp, dst)
}

pub fn replace_file(tmp: &Path, dst: &Path) -> anyhow::Result<()> {
    let backup = dst.with_extension("bak");

    // Windows refuses to rename over an existing file.
    if dst.exists() {
        let _ = fs::remove_file(&backup);
        fs::rename(dst, &backup)
            .with_context(|| format!("failed rename {} -> {}", dst.display(), backup.display()))?;
    }

    if let Err(e) = fs::rename(tmp, dst) {
        if backup.exists() {
            let _ = fs::rename(&backup, dst);
        }
        let _ = fs::remove_file(tmp);
        return Err(anyhow::Error::new(e).context(format!(
            "failed rename {} -> {}",
            tmp.display(),
            dst.display()
        )));
    }

    let _ = fs::remove_file(&backup);
    Ok(())
}

/// Removes `path`; a missing file is fine.
pub fn remove_if_exists(path: &Path) -> anyhow::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            Err(anyhow::Error::new(e).context(format!("failed to remove: {}", path.display())))
        }
    }
}
