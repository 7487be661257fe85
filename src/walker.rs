use ignore::WalkBuilder;
use std::io;
use std::path::PathBuf;

/// Expand files and directories into the files to resolve, respecting gitignore.
///
/// Paths given explicitly are always yielded, hidden or not; files found
/// inside directories skip hidden entries. Order is stable per directory.
pub fn walk_paths(paths: &[PathBuf]) -> impl Iterator<Item = io::Result<PathBuf>> {
    let mut files = vec![];

    for path in paths {
        let walker = WalkBuilder::new(path)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file()) {
                        files.push(Ok(entry.into_path()));
                    }
                }
                Err(e) => files.push(Err(io::Error::other(e.to_string()))),
            }
        }
    }

    files.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn collect(paths: &[PathBuf]) -> Vec<PathBuf> {
        walk_paths(paths).filter_map(|r| r.ok()).collect()
    }

    #[test]
    fn test_walk_single_file() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("main.rs");
        fs::write(&file_path, "fn main() {}").unwrap();

        let files: Vec<_> = walk_paths(&[file_path.clone()]).collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].as_ref().unwrap(), &file_path);
    }

    #[test]
    fn test_walk_explicit_hidden_file() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join(".travis.yml");
        fs::write(&file_path, "language: rust").unwrap();

        assert_eq!(collect(&[file_path.clone()]), [file_path]);
    }

    #[test]
    fn test_recursive_directory_traversal_is_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.txt"), "c").unwrap();

        let files = collect(&[dir.path().to_path_buf()]);
        assert_eq!(
            files,
            [
                dir.path().join("a.txt"),
                dir.path().join("b.txt"),
                dir.path().join("sub/c.txt"),
            ]
        );
    }

    #[test]
    fn test_skip_hidden_files_in_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("visible.txt"), "visible").unwrap();
        fs::write(dir.path().join(".editorconfig"), "root = true\n").unwrap();

        let files = collect(&[dir.path().to_path_buf()]);
        assert_eq!(files, [dir.path().join("visible.txt")]);
    }

    #[test]
    fn test_respect_gitignore() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".gitignore"), "ignored.txt\n").unwrap();
        fs::write(dir.path().join("kept.txt"), "kept").unwrap();
        fs::write(dir.path().join("ignored.txt"), "ignored").unwrap();

        let files = collect(&[dir.path().to_path_buf()]);
        assert_eq!(files, [dir.path().join("kept.txt")]);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let files: Vec<_> = walk_paths(&[dir.path().join("nope")]).collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].is_err());
    }
}
