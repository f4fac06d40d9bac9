//! # Object Key Service
//!
//! ローカルパスからオブジェクトキーを導出するビジネスルール

use std::path::Path;

/// オブジェクトキーの導出
pub struct ObjectKeyService;

impl ObjectKeyService {
    /// POSIX 形式でパスを字句的に正規化する
    ///
    /// - 連続した `/` は1つにまとめる
    /// - `.` セグメントは取り除く
    /// - `..` は直前のセグメントを打ち消す（絶対パスのルートでは捨て、相対パスでは残す）
    /// - 末尾の `/` は取り除き、結果が空なら `.` を返す
    /// - 先頭の `//` も `/` 1つにする（POSIX の normpath は先頭の `//` をそのまま残す）
    ///
    /// ```
    /// use logship::domain::services::object_key::ObjectKeyService;
    ///
    /// assert_eq!(ObjectKeyService::normalize("run-1//var/./log/"), "run-1/var/log");
    /// assert_eq!(ObjectKeyService::normalize("/a/b/../c"), "/a/c");
    /// assert_eq!(ObjectKeyService::normalize(""), ".");
    /// ```
    pub fn normalize(path: &str) -> String {
        if path.is_empty() {
            return ".".to_string();
        }

        let absolute = path.starts_with('/');
        let mut segments: Vec<&str> = Vec::new();

        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.last().is_some_and(|last| *last != "..") {
                        segments.pop();
                    } else if !absolute {
                        segments.push("..");
                    }
                }
                other => segments.push(other),
            }
        }

        let joined = segments.join("/");
        match (absolute, joined.is_empty()) {
            (true, _) => format!("/{}", joined),
            (false, true) => ".".to_string(),
            (false, false) => joined,
        }
    }

    /// ドライバーログのキー: `normalize(prefix + file)`
    ///
    /// プレフィックスとパスの間に区切り文字は挿入しない
    pub fn driver_key(prefix: &str, file: &Path) -> String {
        Self::normalize(&format!("{}{}", prefix, file.to_string_lossy()))
    }

    /// エグゼキューターログのキー: `normalize(prefix + "/" + dir + "/" + file_name)`
    pub fn executor_key(prefix: &str, dir: &Path, file_name: &str) -> String {
        Self::normalize(&format!(
            "{}/{}/{}",
            prefix,
            dir.to_string_lossy(),
            file_name
        ))
    }
}
