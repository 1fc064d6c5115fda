//! jmigrate - GAME DATA JSON MIGRATOR
//!
//! 디렉토리 트리에 흩어진 게임 데이터 JSON 레코드를 선언적 스키마로
//! 일괄 변환(마이그레이션)하거나 조회하는 고성능 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 🚀 **병렬 처리**: Rayon을 활용한 멀티스레드 파일 읽기/쓰기
//! - 🧩 **스키마 엔진**: 술어 + 변환 규칙, 첫 성공 선택, 부분 매칭
//! - 🔀 **깊은 병합**: 변환 결과를 원본 위에 병합, 미지의 필드 보존
//! - ⚖️ **단위 코덱**: 레거시 정수 ↔ 단위 문자열 왕복 변환 (무게/부피/화폐)
//! - 🏳️ **플래그 병합**: extend/delete 목록 기반 리스트 필드 병합
//! - 🛡️ **실패 격리**: 파일 하나의 실패가 배치 전체를 중단하지 않음
//! - 🎨 **컬러 출력**: 소요 시간 색상 표시 및 상세 통계
//!
//! # 예제
//!
//! ```bash
//! # 레거시 단위 필드 일괄 마이그레이션
//! jmigrate migrate -p ./data/json
//!
//! # 타입으로 엔트리 조회, flags 필드만 추출
//! jmigrate query -p ./data/json --type mutation --field flags
//! ```
//!
//! 엔트리 간 참조나 상속(copy-from)은 해석하지 않습니다. 해당 정보가
//! 필요한 레코드는 변경 없이 그대로 통과됩니다.

pub mod cli;
pub mod error;
pub mod flags;
pub mod format;
pub mod parse;
pub mod rules;
pub mod schema;
pub mod stats;
pub mod transform;
pub mod units;

// Re-exports for convenient access
pub use cli::{Args, Command};
pub use error::{JMigrateError, Result};
pub use flags::{resolve_flags, FlagResolution};
pub use parse::{parse_records, read_jsons_rec, SourceEntry, EXCLUDED_FILES};
pub use schema::{FieldMap, FirstMatch, MatchOutcome, Rule, Schema, TypedQuery};
pub use stats::{format_bytes, Statistics, Timeit};
pub use transform::{
    apply_recursively, deep_merge, filter_records, merge_records, migrate_text, BatchReport,
    MigrationOutcome, SKIPPED_TYPES,
};
pub use units::{
    from_legacy_currency, from_legacy_volume, from_legacy_weight, from_unit_string, multiply,
    to_canonical, Quantity,
};
