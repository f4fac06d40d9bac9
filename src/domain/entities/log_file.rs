//! # LogFile Value Object
//!
//! アップロード対象のローカルファイル

use std::path::PathBuf;

/// アップロード対象のファイル
///
/// `dir` は探索ルートから辿ったままのディレクトリパス（絶対/相対はルートに従う）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    /// ファイルのフルパス
    pub path: PathBuf,
    /// ファイルを含むディレクトリ
    pub dir: PathBuf,
    /// ファイル名
    pub file_name: String,
}

impl LogFile {
    /// Splits `path` into its parent directory and file name.
    ///
    /// Returns `None` for paths without a file name component (e.g. `/`).
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_string_lossy().into_owned();
        let dir = path.parent().map(PathBuf::from).unwrap_or_default();
        Some(Self {
            path,
            dir,
            file_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_absolute() {
        let file = LogFile::from_path("/var/log/yarn/app/stdout").unwrap();
        assert_eq!(file.dir, PathBuf::from("/var/log/yarn/app"));
        assert_eq!(file.file_name, "stdout");
    }

    #[test]
    fn test_from_path_relative() {
        let file = LogFile::from_path("stdout").unwrap();
        assert_eq!(file.dir, PathBuf::from(""));
        assert_eq!(file.file_name, "stdout");
    }

    #[test]
    fn test_from_path_root() {
        assert!(LogFile::from_path("/").is_none());
    }
}
