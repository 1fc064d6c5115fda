//! 단위 코덱 모듈
//!
//! 레거시 정수 인코딩과 태그된 단위 문자열("2 kg", "1 L", "150 cent") 간의
//! 결정적이고 왕복 가능한 변환을 담당합니다. I/O 없는 순수 함수입니다.

use crate::error::{JMigrateError, Result};

/// 단위 종류 (무게 / 부피 / 화폐)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// 무게: g, kg (최소 단위 = 1g)
    Weight,
    /// 부피: ml, L (최소 단위 = 1ml)
    Volume,
    /// 화폐: cent, USD, kUSD (최소 단위 = 1 cent)
    Currency,
}

/// 단위 티어: 이름과 최소 단위 대비 배율
struct Tier {
    unit: &'static str,
    ratio: u64,
}

// 작은 단위 → 큰 단위 순서. 배율은 최소 단위 기준.
const WEIGHT_TIERS: &[Tier] = &[
    Tier { unit: "g", ratio: 1 },
    Tier { unit: "kg", ratio: 1000 },
];
const VOLUME_TIERS: &[Tier] = &[
    Tier { unit: "ml", ratio: 1 },
    Tier { unit: "L", ratio: 1000 },
];
const CURRENCY_TIERS: &[Tier] = &[
    Tier { unit: "cent", ratio: 1 },
    Tier { unit: "USD", ratio: 100 },
    Tier { unit: "kUSD", ratio: 100_000 },
];

/// 레거시 부피 1단위 = 250ml
const LEGACY_VOLUME_ML: u64 = 250;

impl Quantity {
    fn tiers(self) -> &'static [Tier] {
        match self {
            Quantity::Weight => WEIGHT_TIERS,
            Quantity::Volume => VOLUME_TIERS,
            Quantity::Currency => CURRENCY_TIERS,
        }
    }

    fn ratio_of(self, unit: &str) -> Option<u64> {
        // "mg"는 파싱만 허용되는 센티널 티어. 배율상 g와 구분하지 않으며
        // 정규화 출력으로는 절대 생성되지 않습니다.
        if self == Quantity::Weight && unit == "mg" {
            return Some(1);
        }
        self.tiers().iter().find(|t| t.unit == unit).map(|t| t.ratio)
    }
}

/// 최소 단위 정수 크기를 정준 단위 문자열로 변환
///
/// 크기를 나누어떨어지게 하는 가장 큰 티어를 선택합니다.
/// 크기 0은 가장 작은 티어로 표현합니다 (예: `0 cent`).
///
/// # Examples
/// ```
/// use jmigrate::units::{to_canonical, Quantity};
///
/// assert_eq!(to_canonical(2000, Quantity::Weight), "2 kg");
/// assert_eq!(to_canonical(1500, Quantity::Weight), "1500 g");
/// assert_eq!(to_canonical(0, Quantity::Currency), "0 cent");
/// ```
pub fn to_canonical(magnitude: u64, quantity: Quantity) -> String {
    let tiers = quantity.tiers();

    if magnitude == 0 {
        return format!("0 {}", tiers[0].unit);
    }

    // 큰 티어부터 검사, 나누어떨어지는 첫 티어 선택
    let tier = tiers
        .iter()
        .rev()
        .find(|t| magnitude % t.ratio == 0)
        .unwrap_or(&tiers[0]);

    format!("{} {}", magnitude / tier.ratio, tier.unit)
}

/// 단위 문자열을 최소 단위 정수 크기로 파싱
///
/// `to_canonical`의 정확한 역함수입니다. 형식이 `"<정수> <단위>"`가
/// 아니거나 단위를 인식할 수 없으면 `InvalidUnitFormat` 에러를 반환합니다.
pub fn from_unit_string(s: &str, quantity: Quantity) -> Result<u64> {
    let invalid = || JMigrateError::InvalidUnitFormat {
        value: s.to_string(),
    };

    let (number, unit) = s.trim().split_once(' ').ok_or_else(invalid)?;
    let magnitude: u64 = number.parse().map_err(|_| invalid())?;
    let ratio = quantity.ratio_of(unit.trim()).ok_or_else(invalid)?;

    // u64 범위를 넘는 크기는 표현 불가능한 값으로 취급
    magnitude.checked_mul(ratio).ok_or_else(invalid)
}

/// 관대한 파싱: 실패 시 에러 대신 크기 0으로 폴백
///
/// 마이그레이션 규칙 내부에서 사용하는 정책입니다. 엄격한 동작이
/// 필요한 호출자는 `from_unit_string`을 직접 사용하세요.
pub fn from_unit_string_lenient(s: &str, quantity: Quantity) -> u64 {
    from_unit_string(s, quantity).unwrap_or(0)
}

/// 단위 문자열에 배율을 곱해 재정규화
///
/// 최소 단위 정수로 파싱 → 곱셈 → 반올림 → 재정규화.
/// 수량을 스케일하는 변환(예: 레시피 2배)의 조합 가능한 빌딩 블록입니다.
pub fn multiply(s: &str, factor: f64, quantity: Quantity) -> Result<String> {
    let magnitude = from_unit_string(s, quantity)?;
    let scaled = (magnitude as f64 * factor).round().max(0.0) as u64;

    Ok(to_canonical(scaled, quantity))
}

/// 레거시 무게를 새 형식으로 변환 (`1 unit` = `1g`)
pub fn from_legacy_weight(g: u64) -> String {
    to_canonical(g, Quantity::Weight)
}

/// 레거시 부피를 새 형식으로 변환 (`1 unit` = `250ml`)
pub fn from_legacy_volume(x: u64) -> String {
    to_canonical(x * LEGACY_VOLUME_ML, Quantity::Volume)
}

/// 레거시 화폐를 새 형식으로 변환 (`1 unit` = `1 cent`)
pub fn from_legacy_currency(c: u64) -> String {
    to_canonical(c, Quantity::Currency)
}
