//! Recursive discovery of regular files under the data root.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::temp_path;

/// A regular file covered by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    /// Path on disk (root joined with the relative path).
    pub path: PathBuf,
    /// Path relative to the project root, forward-slash separated.
    pub rel_path: String,
}

/// Result of scanning the data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// The data root does not exist.
    RootMissing,
    /// The data root exists but holds no regular files.
    Empty,
    /// Files found, sorted by relative path.
    Files(Vec<DataFile>),
}

#[cfg(test)]
impl Discovery {
    fn files(&self) -> &[DataFile] {
        match self {
            Discovery::Files(files) => files,
            _ => &[],
        }
    }
}

/// Enumerate regular files under `root/data_dir`, skipping `exclude` (the
/// ledger itself and its temp file) if it happens to live there.
pub fn discover(root: &Path, data_dir: &Path, exclude: Option<&Path>) -> Result<Discovery> {
    let data_root = root.join(data_dir);
    if !data_root.is_dir() {
        return Ok(Discovery::RootMissing);
    }

    let excluded: Vec<PathBuf> = exclude
        .map(|p| vec![p.to_path_buf(), temp_path(p)])
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| fs::canonicalize(p).ok())
        .collect();

    let mut paths = Vec::new();
    walk(&data_root, &mut paths)?;

    let mut files: Vec<DataFile> = paths
        .into_iter()
        .filter(|p| {
            fs::canonicalize(p)
                .map(|c| !excluded.contains(&c))
                .unwrap_or(true)
        })
        .map(|path| {
            let rel_path = path
                .strip_prefix(root)
                .map(posix_path)
                .unwrap_or_else(|_| posix_path(&path));
            DataFile { path, rel_path }
        })
        .collect();
    files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

    tracing::debug!("discovered {} files under {}", files.len(), data_root.display());
    if files.is_empty() {
        return Ok(Discovery::Empty);
    }
    Ok(Discovery::Files(files))
}

fn walk(dir: &Path, acc: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read dir {}", dir.display()))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat {}", path.display()))?;
        if file_type.is_dir() {
            walk(&path, acc)?;
        } else if fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
            acc.push(path);
        }
    }
    Ok(())
}

/// Render a relative path with `/` separators, dropping `.` components.
pub(crate) fn posix_path(path: &Path) -> String {
    let mut out = String::new();
    for comp in path.components() {
        let part = match comp {
            Component::CurDir => continue,
            Component::RootDir => {
                out.push('/');
                continue;
            }
            Component::Prefix(p) => p.as_os_str().to_string_lossy(),
            Component::ParentDir => "..".into(),
            Component::Normal(s) => s.to_string_lossy(),
        };
        if !out.is_empty() && !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(&part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posix_path_joins_with_slash() {
        let p = Path::new("data").join("sub").join("b.csv");
        assert_eq!(posix_path(&p), "data/sub/b.csv");
        assert_eq!(posix_path(Path::new("./data/a.csv")), "data/a.csv");
    }

    #[test]
    fn missing_root_is_distinct_from_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            discover(dir.path(), Path::new("data"), None).unwrap(),
            Discovery::RootMissing
        );
        fs::create_dir_all(dir.path().join("data/nested")).unwrap();
        assert_eq!(
            discover(dir.path(), Path::new("data"), None).unwrap(),
            Discovery::Empty
        );
    }

    #[test]
    fn finds_nested_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(data.join("b")).unwrap();
        fs::write(data.join("z.csv"), b"z").unwrap();
        fs::write(data.join("b").join("a.csv"), b"a").unwrap();
        fs::write(data.join("a.csv"), b"a").unwrap();

        let found = discover(dir.path(), Path::new("data"), None).unwrap();
        let rels: Vec<&str> = found.files().iter().map(|f| f.rel_path.as_str()).collect();
        assert_eq!(rels, vec!["data/a.csv", "data/b/a.csv", "data/z.csv"]);
    }

    #[test]
    fn excludes_ledger_inside_data_root() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("a.csv"), b"a").unwrap();
        let ledger = data.join("checksums.sha256");
        fs::write(&ledger, b"").unwrap();

        let found = discover(dir.path(), Path::new("data"), Some(&ledger)).unwrap();
        assert_eq!(found.files().len(), 1);
        assert_eq!(found.files()[0].rel_path, "data/a.csv");
    }
}
