//! 데이터 엔트리 파싱 및 파일 탐색 모듈
//!
//! 게임 데이터 JSON 파일을 재귀적으로 수집하고 레코드 시퀀스로 파싱합니다.
//! 파일 하나는 단일 객체 또는 객체 배열을 담을 수 있으며, 파싱 단계에서
//! 단일 객체를 1개짜리 배열로 정규화합니다.

use colored::Colorize;
use rayon::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{JMigrateError, Result};

/// 데이터 파일로 취급하지 않는 예약 파일 이름
pub const EXCLUDED_FILES: &[&str] = &["default.json", "replacements.json"];

/// 원본 파일 내용과 출처 경로
#[derive(Debug, Clone)]
pub struct SourceEntry {
    /// 파일 경로
    pub path: PathBuf,
    /// 파일 전체 텍스트
    pub text: String,
}

/// 파일 이름이 유효한 데이터 JSON인지 확인
fn is_data_json(name: &str) -> bool {
    !EXCLUDED_FILES.contains(&name)
}

fn has_json_ext(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// 게임 데이터 JSON 텍스트를 레코드 시퀀스로 파싱
///
/// 최상위가 배열이면 그대로, 단일 객체면 1개짜리 배열로 감쌉니다.
///
/// # Examples
/// ```
/// use jmigrate::parse::parse_records;
/// use std::path::Path;
///
/// let single = parse_records(r#"{"type": "GUN"}"#, Path::new("a.json")).unwrap();
/// assert_eq!(single.len(), 1);
///
/// let many = parse_records(r#"[{"type": "GUN"}, {"type": "AMMO"}]"#, Path::new("b.json")).unwrap();
/// assert_eq!(many.len(), 2);
/// ```
pub fn parse_records(text: &str, path: &Path) -> Result<Vec<Value>> {
    let raw: Value = serde_json::from_str(text).map_err(|e| JMigrateError::parse(path, e))?;

    Ok(match raw {
        Value::Array(xs) => xs,
        x => vec![x],
    })
}

/// 단일 파일을 SourceEntry로 읽기
fn to_entry(path: &Path) -> Result<SourceEntry> {
    let text = std::fs::read_to_string(path).map_err(|e| JMigrateError::read(path, e))?;

    Ok(SourceEntry {
        path: path.to_path_buf(),
        text,
    })
}

/// 디렉토리 하위의 모든 데이터 JSON 파일을 병렬로 읽기
fn read_dir_recursively(root: &Path) -> Result<Vec<SourceEntry>> {
    let json_files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| has_json_ext(e.path()))
        .filter(|e| {
            e.path()
                .file_name()
                .and_then(|s| s.to_str())
                .map(is_data_json)
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    json_files.par_iter().map(|p| to_entry(p)).collect()
}

/// 단일 경로(파일 또는 디렉토리)에서 엔트리 수집
fn read_jsons_at(root: &Path) -> Result<Vec<SourceEntry>> {
    let meta = std::fs::metadata(root).map_err(|_| JMigrateError::InvalidPath {
        path: root.to_path_buf(),
    })?;

    if meta.is_file() {
        let name = root.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if !is_data_json(name) {
            return Err(JMigrateError::ExcludedFile {
                path: root.to_path_buf(),
            });
        }
        if !has_json_ext(root) {
            return Err(JMigrateError::InvalidPath {
                path: root.to_path_buf(),
            });
        }
        return Ok(vec![to_entry(root)?]);
    }

    if meta.is_dir() {
        return read_dir_recursively(root);
    }

    Err(JMigrateError::InvalidPath {
        path: root.to_path_buf(),
    })
}

/// 주어진 경로들에서 모든 데이터 JSON을 재귀적으로 읽기
///
/// 경로별로 병렬 수행되며 완료 순서는 보장하지 않습니다.
/// 경로 인자 하나라도 유효하지 않으면 즉시 실패합니다 (마이그레이션 정책).
pub fn read_jsons_rec(paths: &[PathBuf]) -> Result<Vec<SourceEntry>> {
    let nested: Vec<Vec<SourceEntry>> = paths
        .par_iter()
        .map(|p| read_jsons_at(p))
        .collect::<Result<_>>()?;

    Ok(nested.into_iter().flatten().collect())
}

/// 관대한 수집: 실패한 경로는 로그만 남기고 건너뜀 (쿼리 정책)
pub fn read_jsons_rec_lenient(paths: &[PathBuf]) -> Vec<SourceEntry> {
    paths
        .par_iter()
        .filter_map(|p| match read_jsons_at(p) {
            Ok(entries) => Some(entries),
            Err(e) => {
                println!("{} {}", "ERROR".on_red().bright_white(), e);
                None
            }
        })
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_json_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_single_object() {
        let records = parse_records(r#"{"type": "GUN", "id": "m4"}"#, Path::new("x.json")).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "GUN");
    }

    #[test]
    fn test_parse_array() {
        let records =
            parse_records(r#"[{"type": "GUN"}, {"type": "AMMO"}]"#, Path::new("x.json")).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_malformed() {
        let result = parse_records(r#"{"type": broken"#, Path::new("bad.json"));
        assert!(matches!(result, Err(JMigrateError::ParseError { .. })));
    }

    #[test]
    fn test_read_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_json_file(temp_dir.path(), "gun.json", r#"{"type": "GUN"}"#);

        let entries = read_jsons_rec(&[path]).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, r#"{"type": "GUN"}"#);
    }

    #[test]
    fn test_read_directory_recursively() {
        let temp_dir = TempDir::new().unwrap();
        create_json_file(temp_dir.path(), "a.json", r#"{"type": "a"}"#);
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        create_json_file(&sub, "b.json", r#"{"type": "b"}"#);
        create_json_file(&sub, "note.txt", "not json");

        let entries = read_jsons_rec(&[temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_excluded_files_skipped_in_directory() {
        let temp_dir = TempDir::new().unwrap();
        create_json_file(temp_dir.path(), "a.json", r#"{"type": "a"}"#);
        create_json_file(temp_dir.path(), "default.json", r#"{}"#);
        create_json_file(temp_dir.path(), "replacements.json", r#"{}"#);

        let entries = read_jsons_rec(&[temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_excluded_file_as_argument_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_json_file(temp_dir.path(), "default.json", r#"{}"#);

        let result = read_jsons_rec(&[path]);
        assert!(matches!(result, Err(JMigrateError::ExcludedFile { .. })));
    }

    #[test]
    fn test_non_json_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_json_file(temp_dir.path(), "data.txt", "hello");

        let result = read_jsons_rec(&[path]);
        assert!(matches!(result, Err(JMigrateError::InvalidPath { .. })));
    }

    #[test]
    fn test_missing_path_fails() {
        let result = read_jsons_rec(&[PathBuf::from("/nonexistent/nowhere")]);
        assert!(matches!(result, Err(JMigrateError::InvalidPath { .. })));
    }

    #[test]
    fn test_lenient_skips_bad_paths() {
        let temp_dir = TempDir::new().unwrap();
        let good = create_json_file(temp_dir.path(), "a.json", r#"{"type": "a"}"#);

        let entries = read_jsons_rec_lenient(&[good, PathBuf::from("/nonexistent/nowhere")]);
        assert_eq!(entries.len(), 1);
    }
}
