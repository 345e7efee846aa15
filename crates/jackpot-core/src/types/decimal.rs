//! 금액 및 수익률 계산을 위한 Decimal 유틸리티.
//!
//! 로또 구매 금액, 당첨금, 지수 종가는 모두 `Decimal`로 다루고,
//! 차트를 그릴 때만 `f64`로 변환합니다.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 금액 및 가격 타입 (구매 금액, 당첨금, 종가).
pub type Price = Decimal;

/// 지수 보유 수량 타입.
pub type Quantity = Decimal;

/// 퍼센트 포인트 타입 (25.0 = 25%).
pub type Percentage = Decimal;

/// 수익률 표시 자릿수.
pub const PERCENT_DECIMALS: u32 = 1;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 수익률 표시 자릿수로 반올림합니다 (banker's rounding).
    fn round_percent(&self) -> Decimal;

    /// 양수에는 `+` 부호를 붙인 소수 첫째 자리 문자열로 변환합니다 (예: "+2.5").
    fn to_signed_string(&self) -> String;

    /// 차트 좌표용 f64로 변환합니다.
    fn to_f64_lossy(&self) -> f64;
}

impl DecimalExt for Decimal {
    fn round_percent(&self) -> Decimal {
        self.round_dp(PERCENT_DECIMALS)
    }

    fn to_signed_string(&self) -> String {
        let value = self.round_percent();
        if value.is_zero() {
            // -0.0 표시 방지
            format!("{:.1}", Decimal::ZERO)
        } else if value > Decimal::ZERO {
            format!("+{:.1}", value)
        } else {
            format!("{:.1}", value)
        }
    }

    fn to_f64_lossy(&self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_percent_uses_bankers_rounding() {
        assert_eq!(dec!(0.25).round_percent(), dec!(0.2));
        assert_eq!(dec!(0.35).round_percent(), dec!(0.4));
        assert_eq!(dec!(-33.333).round_percent(), dec!(-33.3));
    }

    #[test]
    fn test_signed_string() {
        assert_eq!(dec!(2.5).to_signed_string(), "+2.5");
        assert_eq!(dec!(25).to_signed_string(), "+25.0");
        assert_eq!(dec!(-100).to_signed_string(), "-100.0");
        assert_eq!(dec!(0).to_signed_string(), "0.0");
        assert_eq!(dec!(-0.04).to_signed_string(), "0.0");
    }

    #[test]
    fn test_to_f64_lossy() {
        assert_eq!(dec!(-12.5).to_f64_lossy(), -12.5);
    }
}
