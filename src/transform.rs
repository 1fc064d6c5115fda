//! 변환 파이프라인 모듈
//!
//! 파서와 스키마 엔진을 조합해 두 가지 정책을 구현합니다:
//! **filter** (스키마에 매칭되는 레코드만 추출 — 쿼리 모드)와
//! **merge-transform** (매칭 레코드를 원본 위에 깊은 병합으로 재작성,
//! 비매칭 레코드는 그대로 통과 — 마이그레이션 모드).
//! 변환 결과를 파일로 되쓰는 병렬 드라이버도 여기에 있습니다.

use colored::Colorize;
use rayon::prelude::*;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{JMigrateError, Result};
use crate::parse::{parse_records, SourceEntry};
use crate::schema::{MatchOutcome, Schema};

/// 스키마 모델로 안전하게 왕복할 수 없는 위치/절차 데이터 타입.
/// 이 타입을 포함한 파일은 통째로 건너뛰고 보고만 합니다.
pub const SKIPPED_TYPES: &[&str] = &["mapgen", "palette", "mod_tileset"];

/// 깊은 구조적 병합
///
/// 객체는 키 단위로 재귀 병합 (오른쪽 우선), 배열은 오른쪽이 통째로
/// 교체, 스칼라는 교체. 왼쪽에만 있는 필드는 전부 보존됩니다.
pub fn deep_merge(base: Value, over: Value) -> Value {
    match (base, over) {
        (Value::Object(mut left), Value::Object(right)) => {
            for (key, over_value) in right {
                let merged = match left.remove(&key) {
                    Some(base_value) => deep_merge(base_value, over_value),
                    None => over_value,
                };
                left.insert(key, merged);
            }
            Value::Object(left)
        }
        // 배열은 병합하지 않고 교체
        (_, over) => over,
    }
}

/// 스키마에 매칭되는 레코드만 추출 (쿼리 모드)
///
/// 매칭된 레코드는 스키마의 변환 결과로 치환되고, 비매칭 레코드는
/// 에러 없이 조용히 버려집니다.
pub fn filter_records(schema: &dyn Schema, text: &str, path: &Path) -> Result<Vec<Value>> {
    let records = parse_records(text, path)?;

    Ok(records
        .into_iter()
        .filter_map(|x| schema.attempt(&x).into_value())
        .collect())
}

/// 매칭 레코드를 원본 위에 병합, 비매칭은 그대로 통과 (마이그레이션 모드)
pub fn merge_records(schema: &dyn Schema, records: Vec<Value>) -> Vec<Value> {
    records
        .into_iter()
        .map(|x| match schema.attempt(&x) {
            MatchOutcome::Matched(parsed) => deep_merge(x, parsed),
            MatchOutcome::Unmatched => x,
        })
        .collect()
}

/// 파일 하나의 마이그레이션 결과
#[derive(Debug, PartialEq)]
pub enum MigrationOutcome {
    /// 재작성된 파일 텍스트 (pretty JSON)
    Rewritten(String),
    /// 건너뛴 파일 (SKIPPED_TYPES 포함)
    Skipped,
}

fn has_skipped_type(records: &[Value]) -> bool {
    records.iter().any(|x| {
        x.get("type")
            .and_then(Value::as_str)
            .map(|t| SKIPPED_TYPES.contains(&t))
            .unwrap_or(false)
    })
}

/// 파일 텍스트 하나에 merge-transform 적용
///
/// 최상위 모양을 보존합니다: 단일 객체 파일은 객체로, 배열 파일은
/// 배열로 재직렬화됩니다. SKIPPED_TYPES 타입이 하나라도 있으면
/// 파일을 건드리지 않고 `Skipped`를 반환합니다.
pub fn migrate_text(schema: &dyn Schema, text: &str, path: &Path) -> Result<MigrationOutcome> {
    let raw: Value = serde_json::from_str(text).map_err(|e| JMigrateError::parse(path, e))?;
    let was_array = raw.is_array();

    let records = match raw {
        Value::Array(xs) => xs,
        x => vec![x],
    };

    if has_skipped_type(&records) {
        return Ok(MigrationOutcome::Skipped);
    }

    let mut merged = merge_records(schema, records);
    let output = if was_array {
        Value::Array(merged)
    } else {
        // 단일 객체 파일은 배열로 승격하지 않음
        merged.pop().unwrap_or(Value::Object(Map::new()))
    };

    let pretty = serde_json::to_string_pretty(&output)
        .map_err(|e| JMigrateError::SerializeError {
            reason: e.to_string(),
        })?;

    Ok(MigrationOutcome::Rewritten(pretty))
}

/// 배치 실행 결과 보고
#[derive(Debug, Default)]
pub struct BatchReport {
    /// 재작성된 파일 경로 (포매터 대상)
    pub rewritten: Vec<PathBuf>,
    /// 건너뛴 파일 경로
    pub skipped: Vec<PathBuf>,
    /// 실패한 파일 경로와 사유
    pub errors: Vec<(PathBuf, String)>,
}

enum EntryOutcome {
    Rewritten(PathBuf),
    Skipped(PathBuf),
    Failed(PathBuf, String),
}

/// 모든 엔트리에 변환을 병렬 적용하고 원본 파일을 덮어쓰기
///
/// 완료 순서는 보장하지 않으며, 엔트리 하나의 실패는 로그로 격리되어
/// 나머지 엔트리에 영향을 주지 않습니다. 모든 엔트리는 정확히
/// 한 번씩 시도되고, 재시도는 없습니다.
pub fn apply_recursively<F>(transform: F, entries: &[SourceEntry]) -> BatchReport
where
    F: Fn(&SourceEntry) -> Result<MigrationOutcome> + Send + Sync,
{
    let outcomes: Vec<EntryOutcome> = entries
        .par_iter()
        .map(|entry| {
            let written = transform(entry).and_then(|outcome| match outcome {
                MigrationOutcome::Skipped => Ok(EntryOutcome::Skipped(entry.path.clone())),
                MigrationOutcome::Rewritten(out) => std::fs::write(&entry.path, out)
                    .map(|_| EntryOutcome::Rewritten(entry.path.clone()))
                    .map_err(|e| JMigrateError::WriteError {
                        file: entry.path.clone(),
                        reason: e.to_string(),
                    }),
            });

            written.unwrap_or_else(|e| {
                println!(
                    "{} @ {}: {}",
                    "ERROR".on_red().bright_white(),
                    entry.path.display(),
                    e
                );
                EntryOutcome::Failed(entry.path.clone(), e.to_string())
            })
        })
        .collect();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            EntryOutcome::Rewritten(path) => report.rewritten.push(path),
            EntryOutcome::Skipped(path) => report.skipped.push(path),
            EntryOutcome::Failed(path, reason) => report.errors.push((path, reason)),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::legacy_units_schema;
    use crate::schema::Rule;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_deep_merge_objects() {
        let base = json!({"a": 1, "b": {"x": 1, "y": 2}, "c": "keep"});
        let over = json!({"b": {"y": 3, "z": 4}, "d": true});

        assert_eq!(
            deep_merge(base, over),
            json!({"a": 1, "b": {"x": 1, "y": 3, "z": 4}, "c": "keep", "d": true})
        );
    }

    #[test]
    fn test_deep_merge_arrays_replaced() {
        let base = json!({"flags": ["A", "B"], "n": 1});
        let over = json!({"flags": ["C"]});

        assert_eq!(deep_merge(base, over), json!({"flags": ["C"], "n": 1}));
    }

    #[test]
    fn test_merge_preserves_unknown_fields() {
        let schema = legacy_units_schema();
        let records = vec![json!({
            "type": "GUN", "id": "m4", "weight": 2000,
            "obscure_field": {"nested": [1, 2]}
        })];

        let merged = merge_records(&schema, records);
        assert_eq!(
            merged[0],
            json!({
                "type": "GUN", "id": "m4", "weight": "2 kg",
                "obscure_field": {"nested": [1, 2]}
            })
        );
    }

    #[test]
    fn test_merge_passthrough_on_unmatched() {
        let schema = Rule::passthrough(|v| v.get("never").is_some());
        let original = json!({"type": "GUN", "weight": 2000});

        let merged = merge_records(&schema, vec![original.clone()]);
        assert_eq!(merged[0], original);
    }

    #[test]
    fn test_filter_drops_unmatched_without_error() {
        let schema = Rule::new(
            |v| v["type"] == "AMMO",
            |v| v["id"].clone(),
        );
        let text = r#"[
            {"type": "AMMO", "id": "9mm"},
            {"type": "GUN", "id": "m4"},
            {"type": "AMMO", "id": "45acp"}
        ]"#;

        let found = filter_records(&schema, text, Path::new("x.json")).unwrap();
        assert_eq!(found, vec![json!("9mm"), json!("45acp")]);
    }

    #[test]
    fn test_migrate_text_preserves_array_shape() {
        let schema = legacy_units_schema();
        let out = migrate_text(&schema, r#"[{"type": "GUN", "weight": 1000}]"#, Path::new("a.json"))
            .unwrap();

        let MigrationOutcome::Rewritten(text) = out else {
            panic!("expected rewritten output");
        };
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed[0]["weight"], "1 kg");
    }

    #[test]
    fn test_migrate_text_preserves_object_shape() {
        let schema = legacy_units_schema();
        let out = migrate_text(&schema, r#"{"type": "GUN", "volume": 4}"#, Path::new("a.json"))
            .unwrap();

        let MigrationOutcome::Rewritten(text) = out else {
            panic!("expected rewritten output");
        };
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert!(parsed.is_object());
        assert_eq!(parsed["volume"], "1 L");
    }

    #[test]
    fn test_migrate_text_skips_mapgen() {
        let schema = legacy_units_schema();
        let text = r#"[{"type": "mapgen", "om_terrain": "field"}, {"type": "GUN", "weight": 1}]"#;

        let out = migrate_text(&schema, text, Path::new("map.json")).unwrap();
        assert_eq!(out, MigrationOutcome::Skipped);
    }

    #[test]
    fn test_apply_recursively_isolates_failures() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.json");
        fs::write(&good, r#"{"type": "GUN", "weight": 2000}"#).unwrap();
        let bad = temp_dir.path().join("bad.json");

        let entries = vec![
            SourceEntry {
                path: bad.clone(),
                text: "{broken".to_string(),
            },
            SourceEntry {
                path: good.clone(),
                text: fs::read_to_string(&good).unwrap(),
            },
        ];

        let schema = legacy_units_schema();
        let report =
            apply_recursively(|e| migrate_text(&schema, &e.text, &e.path), &entries);

        // 실패한 엔트리가 있어도 나머지는 성공적으로 기록됨
        assert_eq!(report.rewritten, vec![good.clone()]);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].0, bad);

        let written: Value = serde_json::from_str(&fs::read_to_string(&good).unwrap()).unwrap();
        assert_eq!(written["weight"], "2 kg");
    }

    #[test]
    fn test_apply_recursively_reports_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let map = temp_dir.path().join("map.json");
        let original = r#"[{"type": "palette", "weight": 77}]"#;
        fs::write(&map, original).unwrap();

        let entries = vec![SourceEntry {
            path: map.clone(),
            text: original.to_string(),
        }];

        let schema = legacy_units_schema();
        let report = apply_recursively(|e| migrate_text(&schema, &e.text, &e.path), &entries);

        assert_eq!(report.skipped, vec![map.clone()]);
        // 건너뛴 파일은 바이트 단위로 손대지 않음
        assert_eq!(fs::read_to_string(&map).unwrap(), original);
    }
}
