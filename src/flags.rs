//! 플래그 병합 모듈
//!
//! 플래그 리스트(문자열 토큰 배열) 필드에 대한 가산/감산 병합을
//! 구현합니다. 상속 확장(`extend`/`delete`) 해석의 빌딩 블록입니다.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// 필드별 extend/delete 목록
#[derive(Debug, Clone, Default)]
pub struct FlagResolution {
    /// 필드에 덧붙일 값 목록
    pub extend: BTreeMap<String, Vec<Value>>,
    /// 필드에서 제거할 값 목록
    pub delete: BTreeMap<String, Vec<Value>>,
}

/// 값이 플래그 리스트(문자열만으로 이루어진 배열)인지 확인
fn is_flag_list(value: &Value) -> bool {
    value
        .as_array()
        .map(|xs| xs.iter().all(Value::is_string))
        .unwrap_or(false)
}

fn delete_then_extend(
    xs: &[Value],
    del: Option<&Vec<Value>>,
    ext: Option<&Vec<Value>>,
) -> Vec<Value> {
    let mut result: Vec<Value> = match del {
        Some(del) => xs.iter().filter(|x| !del.contains(x)).cloned().collect(),
        None => xs.to_vec(),
    };
    if let Some(ext) = ext {
        // 중복 제거하지 않음: extend로 들어온 중복은 그대로 유지
        result.extend(ext.iter().cloned());
    }
    result
}

/// 레코드의 플래그 리스트 필드에 extend/delete 병합 적용
///
/// 각 플래그 리스트 필드에 대해 삭제 → 확장 순으로 처리하며, 살아남은
/// 원소의 상대 순서 뒤에 확장 순서가 이어집니다. `extend`에만 있고
/// 레코드에 없는 키는 확장 목록 그대로 새 필드로 주입됩니다
/// (주입 순서는 키 정렬 순서로 결정적).
/// 플래그 리스트가 아닌 필드는 건드리지 않습니다. 입력은 변경되지
/// 않고 새 레코드를 반환합니다.
pub fn resolve_flags(record: &Map<String, Value>, resolution: &FlagResolution) -> Map<String, Value> {
    let mut resolved: Map<String, Value> = record
        .iter()
        .map(|(key, value)| {
            let mapped = match value.as_array() {
                Some(xs) if is_flag_list(value) => Value::Array(delete_then_extend(
                    xs,
                    resolution.delete.get(key),
                    resolution.extend.get(key),
                )),
                _ => value.clone(),
            };
            (key.clone(), mapped)
        })
        .collect();

    for (key, ext) in &resolution.extend {
        if !record.contains_key(key) {
            resolved.insert(key.clone(), Value::Array(ext.clone()));
        }
    }

    resolved
}
