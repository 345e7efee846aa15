//! 누적 수익률 계산.
//!
//! 같은 금액을 로또 대신 지수에 투자했을 때의 가치를 회차별로 계산합니다.

use super::alignment::AlignedRound;
use crate::domain::{ComparisonRow, ComparisonTable};
use crate::types::{DecimalExt, Percentage, Price, Quantity};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// 로또 누적 수익률: (누적 당첨금 - 누적 구매 금액) / 누적 구매 금액 × 100.
pub fn lottery_return_pct(cumulative_win: Price, cumulative_spend: Price) -> Option<Percentage> {
    if cumulative_spend.is_zero() {
        return None;
    }
    let pct = (cumulative_win - cumulative_spend)
        .checked_div(cumulative_spend)?
        .checked_mul(dec!(100))?;
    Some(pct.round_percent())
}

/// 지수 누적 수익률: (평가 금액 / 누적 구매 금액 - 1) × 100.
pub fn index_return_pct(index_value: Price, cumulative_spend: Price) -> Option<Percentage> {
    if cumulative_spend.is_zero() {
        return None;
    }
    let ratio = index_value.checked_div(cumulative_spend)?;
    let pct = (ratio - Decimal::ONE).checked_mul(dec!(100))?;
    Some(pct.round_percent())
}

/// 구매 금액으로 살 수 있는 지수 수량.
pub fn purchasable_units(price: Price, close: Option<Price>) -> Option<Quantity> {
    let close = close.filter(|c| !c.is_zero())?;
    price.checked_div(close)
}

/// 매칭된 회차로 회차별 누적 값을 계산합니다.
///
/// 지수 수량이 없는 행은 누적 수량, 평가 금액, 지수 수익률도 `None`이 되며
/// 이후 행의 누적 수량 합계에는 영향을 주지 않습니다.
pub fn compute_returns(aligned: &[AlignedRound]) -> ComparisonTable {
    let mut cumulative_spend = Decimal::ZERO;
    let mut cumulative_win = Decimal::ZERO;
    let mut units_total = Decimal::ZERO;

    let rows = aligned
        .iter()
        .enumerate()
        .map(|(round, a)| {
            cumulative_spend += a.round.price;
            cumulative_win += a.round.win;

            let index_units = purchasable_units(a.round.price, a.close);
            let cumulative_units = index_units.map(|units| {
                units_total += units;
                units_total
            });
            let index_value = cumulative_units
                .zip(a.close)
                .and_then(|(units, close)| units.checked_mul(close));
            let index_return = index_value.and_then(|value| index_return_pct(value, cumulative_spend));

            ComparisonRow {
                round,
                date: a.round.date,
                price: a.round.price,
                win: a.round.win,
                trading_date: a.trading_date,
                close: a.close,
                cumulative_spend,
                cumulative_win,
                lottery_return_pct: lottery_return_pct(cumulative_win, cumulative_spend),
                index_units,
                cumulative_units,
                index_value,
                index_return_pct: index_return,
            }
        })
        .collect();

    ComparisonTable::new(rows)
}
