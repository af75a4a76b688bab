use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::GenError;

/// Write `text` to `path`, creating missing parent directories.
///
/// The text goes to a temporary file in the target directory which is then
/// renamed over `path`, so a failed write leaves any previous file intact.
pub fn write_source(path: &Path, text: &str) -> Result<(), GenError> {
    let emit_err = |source: std::io::Error| GenError::Emit {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(emit_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(emit_err)?;
    tmp.write_all(text.as_bytes()).map_err(emit_err)?;
    tmp.as_file().sync_all().map_err(emit_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(emit_err)?;
    }

    tmp.persist(path).map_err(|e| emit_err(e.error))?;
    info!(path = %path.display(), bytes = text.len(), "Wrote generated source");
    Ok(())
}
