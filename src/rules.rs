//! 내장 마이그레이션 규칙 모듈
//!
//! 레거시 정수 인코딩 필드를 새 표기로 옮기는 필드 매퍼 모음입니다.
//! 모든 매퍼는 관대한 정책을 따릅니다: 기대한 모양이 아니면 값을
//! 그대로 돌려보냅니다 (항등).

use serde_json::{json, Value};

use crate::schema::FieldMap;
use crate::units::{from_legacy_currency, from_legacy_volume, from_legacy_weight};

/// `123` -> `"123 g"` (이미 문자열이면 그대로)
pub fn map_weight(v: &Value) -> Value {
    match v.as_u64() {
        Some(g) => json!(from_legacy_weight(g)),
        None => v.clone(),
    }
}

/// `"volume": 4` -> `"1 L"`
pub fn map_volume(v: &Value) -> Value {
    match v.as_u64() {
        Some(x) => json!(from_legacy_volume(x)),
        None => v.clone(),
    }
}

/// `"price": 150` -> `"150 cent"`
pub fn map_price(v: &Value) -> Value {
    match v.as_u64() {
        Some(c) => json!(from_legacy_currency(c)),
        None => v.clone(),
    }
}

/// `"name"` -> `{ "str_sp": "name" }`
pub fn map_name(v: &Value) -> Value {
    match v.as_str() {
        Some(str_sp) => json!({ "str_sp": str_sp }),
        None => v.clone(),
    }
}

/// `"nanite"` -> `[ "nanite" ]`
pub fn map_material(v: &Value) -> Value {
    match v.as_str() {
        Some(s) => json!([s]),
        None => v.clone(),
    }
}

/// 레거시 단위 필드 일괄 마이그레이션 스키마
///
/// weight/volume/price는 숫자 → 단위 문자열, name은 문자열 → str_sp 객체,
/// material은 문자열 → 배열. 존재하는 필드만 변환하며 나머지는 병합
/// 단계에서 보존됩니다.
pub fn legacy_units_schema() -> FieldMap {
    FieldMap::new()
        .with_field("weight", map_weight)
        .with_field("volume", map_volume)
        .with_field("price", map_price)
        .with_field("name", map_name)
        .with_field("material", map_material)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn test_map_weight() {
        assert_eq!(map_weight(&json!(2000)), json!("2 kg"));
        assert_eq!(map_weight(&json!(1500)), json!("1500 g"));
        // 이미 변환된 값은 그대로
        assert_eq!(map_weight(&json!("2 kg")), json!("2 kg"));
    }

    #[test]
    fn test_map_volume() {
        assert_eq!(map_volume(&json!(4)), json!("1 L"));
        assert_eq!(map_volume(&json!(1)), json!("250 ml"));
    }

    #[test]
    fn test_map_price() {
        assert_eq!(map_price(&json!(100000)), json!("1 kUSD"));
        assert_eq!(map_price(&json!(150)), json!("150 cent"));
    }

    #[test]
    fn test_map_name_and_material() {
        assert_eq!(map_name(&json!("knife")), json!({"str_sp": "knife"}));
        assert_eq!(map_name(&json!({"str": "knife"})), json!({"str": "knife"}));
        assert_eq!(map_material(&json!("nanite")), json!(["nanite"]));
        assert_eq!(map_material(&json!(["steel"])), json!(["steel"]));
    }

    #[test]
    fn test_legacy_units_schema_partial() {
        let schema = legacy_units_schema();
        let out = schema
            .attempt(&json!({"type": "GUN", "weight": 2000, "fun": 3}))
            .into_value()
            .unwrap();

        assert_eq!(out, json!({"weight": "2 kg"}));
    }
}
