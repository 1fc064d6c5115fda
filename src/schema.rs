//! 스키마 엔진 정책 모듈
//!
//! "검증하고 선택적으로 변환하는" 선언적 스키마의 정책 계층입니다.
//! 매칭 실패는 에러가 아니라 명시적 `Unmatched` 값으로 처리되며,
//! 복합 스키마는 선언된 순서대로 평가되어 첫 성공이 이깁니다.

use serde_json::{Map, Value};

/// 스키마 매칭 결과
///
/// 센티널 값 대신 명시적인 합 타입을 사용합니다.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// 매칭 성공: 변환된 값
    Matched(Value),
    /// 매칭 실패
    Unmatched,
}

impl MatchOutcome {
    /// 매칭 성공 여부
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }

    /// 변환된 값 꺼내기 (실패 시 None)
    pub fn into_value(self) -> Option<Value> {
        match self {
            MatchOutcome::Matched(v) => Some(v),
            MatchOutcome::Unmatched => None,
        }
    }
}

/// 선언적 검증/변환 스키마
///
/// `attempt`는 절대 패닉하거나 에러를 전파하지 않습니다.
/// 어떤 검증 실패든 `Unmatched`로 귀결됩니다.
pub trait Schema: Send + Sync {
    /// 레코드에 스키마 적용 시도
    fn attempt(&self, record: &Value) -> MatchOutcome;
}

type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;
type Transform = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// 술어 + 변환 쌍으로 이루어진 기본 규칙
pub struct Rule {
    predicate: Predicate,
    transform: Transform,
}

impl Rule {
    /// 술어와 변환으로 규칙 생성
    pub fn new(
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
        transform: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicate: Box::new(predicate),
            transform: Box::new(transform),
        }
    }

    /// 변환 없이 매칭된 레코드를 그대로 통과시키는 규칙
    pub fn passthrough(predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self::new(predicate, Clone::clone)
    }
}

impl Schema for Rule {
    fn attempt(&self, record: &Value) -> MatchOutcome {
        if (self.predicate)(record) {
            MatchOutcome::Matched((self.transform)(record))
        } else {
            MatchOutcome::Unmatched
        }
    }
}

/// 순서 있는 복합 스키마: 첫 성공이 이김
///
/// 하위 스키마를 선언된 순서대로 시도하고, 처음 매칭된 결과를 반환합니다.
/// 모두 실패하면 `Unmatched`입니다.
pub struct FirstMatch {
    branches: Vec<Box<dyn Schema>>,
}

impl FirstMatch {
    pub fn new(branches: Vec<Box<dyn Schema>>) -> Self {
        Self { branches }
    }
}

impl Schema for FirstMatch {
    fn attempt(&self, record: &Value) -> MatchOutcome {
        for branch in &self.branches {
            if let MatchOutcome::Matched(v) = branch.attempt(record) {
                return MatchOutcome::Matched(v);
            }
        }
        MatchOutcome::Unmatched
    }
}

type FieldMapper = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// 필드 단위 부분 스키마
///
/// 객체 레코드에만 매칭되며, 등록된 필드 중 레코드에 존재하는 것만
/// 매퍼를 거쳐 출력에 포함합니다. 나머지 필드는 건드리지 않습니다
/// (부분적이고 열린 스키마 — 병합은 변환 파이프라인이 담당).
#[derive(Default)]
pub struct FieldMap {
    mappers: Vec<(String, FieldMapper)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드 매퍼 등록
    pub fn with_field(
        mut self,
        field: impl Into<String>,
        mapper: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.mappers.push((field.into(), Box::new(mapper)));
        self
    }
}

impl Schema for FieldMap {
    fn attempt(&self, record: &Value) -> MatchOutcome {
        let Value::Object(obj) = record else {
            return MatchOutcome::Unmatched;
        };

        let mut mapped = Map::new();
        for (field, mapper) in &self.mappers {
            if let Some(value) = obj.get(field) {
                mapped.insert(field.clone(), mapper(value));
            }
        }

        MatchOutcome::Matched(Value::Object(mapped))
    }
}

/// `type` (및 선택적 `id`) 기준 쿼리 스키마
///
/// 매칭된 레코드 전체를 반환하거나, `project`가 지정되면
/// 해당 필드 값 하나만 추출합니다.
pub struct TypedQuery {
    entry_type: String,
    id: Option<String>,
    project: Option<String>,
}

impl TypedQuery {
    pub fn new(entry_type: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            id: None,
            project: None,
        }
    }

    /// id까지 일치해야 매칭
    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    /// 매칭된 레코드에서 한 필드만 추출
    pub fn with_projection(mut self, field: Option<String>) -> Self {
        self.project = field;
        self
    }
}

impl Schema for TypedQuery {
    fn attempt(&self, record: &Value) -> MatchOutcome {
        let Value::Object(obj) = record else {
            return MatchOutcome::Unmatched;
        };

        if obj.get("type").and_then(Value::as_str) != Some(self.entry_type.as_str()) {
            return MatchOutcome::Unmatched;
        }

        if let Some(ref want) = self.id {
            if obj.get("id").and_then(Value::as_str) != Some(want.as_str()) {
                return MatchOutcome::Unmatched;
            }
        }

        match &self.project {
            Some(field) => match obj.get(field) {
                Some(v) => MatchOutcome::Matched(v.clone()),
                None => MatchOutcome::Unmatched,
            },
            None => MatchOutcome::Matched(record.clone()),
        }
    }
}
