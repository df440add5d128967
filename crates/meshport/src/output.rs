//! Writing the destination file.

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use log::trace;

/// Writes `contents` to `path` so that readers see either the previous file
/// or the complete new one, never a partial write.
///
/// The data goes to a temporary file next to the destination, which is then
/// renamed over it. An existing destination is resolved first, so a symlink
/// is written through rather than replaced, and the file keeps its
/// permissions.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let target = resolve_destination(path)?;
    let existing = fs::metadata(&target)
        .ok()
        .map(|metadata| metadata.permissions());

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::Builder::new()
        .prefix(".meshport-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    trace!(temp_path:? = file.path(), output_path:? = target; "Writing temporary output");

    file.write_all(contents)?;
    file.flush()?;

    match existing {
        Some(permissions) => file.as_file().set_permissions(permissions)?,
        None => set_default_permissions(file.as_file())?,
    }

    file.persist(&target).map_err(|err| err.error)?;
    Ok(())
}

/// Follows symlinks of an existing destination; a new one is used as given.
fn resolve_destination(path: &Path) -> io::Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(err) => Err(err),
    }
}

// Temporary files are created owner-only; a new output is a regular document.
#[cfg(unix)]
fn set_default_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn test_writes_new_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_atomically(&path, b"{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "old contents that are longer").unwrap();

        write_atomically(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_leaves_no_temporary_files() {
        let dir = tempdir().unwrap();
        write_atomically(&dir.path().join("out.json"), b"[]").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["out.json"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_atomically(&path, b"{}").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        write_atomically(&path, b"new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_writes_through_symlink() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("viewer_data.json");
        let link = dir.path().join("out.json");
        fs::write(&target, "old").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        write_atomically(&link, b"new").unwrap();

        let link_type = fs::symlink_metadata(&link).unwrap().file_type();
        assert!(link_type.is_symlink());
        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        assert_eq!(fs::read_to_string(&link).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_into_other_directory() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("data");
        fs::create_dir(&data_dir).unwrap();
        let target = data_dir.join("mesh.json");
        let link = dir.path().join("out.json");
        fs::write(&target, "old").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        write_atomically(&link, b"new").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
        let names: Vec<_> = fs::read_dir(&data_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["mesh.json"]);
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");

        assert!(write_atomically(&path, b"{}").is_err());
        assert!(!path.exists());
    }
}
