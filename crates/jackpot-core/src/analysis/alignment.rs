//! 추첨일 → 거래일 매칭.
//!
//! 추첨은 주말(토요일)에 진행되므로 추첨일 당일 종가가 없는 경우가 대부분입니다.
//! 추첨일 이후 가장 가까운 거래일의 종가를 사용합니다.

use crate::domain::{ClosingSeries, LotteryRound};
use crate::types::Price;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// 거래일 매칭이 끝난 회차.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedRound {
    /// 원본 회차
    pub round: LotteryRound,
    /// 매칭된 거래일 (매칭 실패 시 추첨일)
    pub trading_date: NaiveDate,
    /// 매칭된 거래일 종가
    pub close: Option<Price>,
}

/// `date` 이후(당일 포함) 첫 거래일을 찾습니다.
///
/// 마지막 거래일보다 늦은 날짜는 `None`을 반환합니다.
pub fn resolve_trading_day(date: NaiveDate, trading_days: &BTreeSet<NaiveDate>) -> Option<NaiveDate> {
    trading_days.range(date..).next().copied()
}

/// 회차를 거래일 종가와 left join 합니다.
///
/// 출력 순서는 입력 회차 순서와 같습니다.
pub fn align_rounds(rounds: &[LotteryRound], closes: &ClosingSeries) -> Vec<AlignedRound> {
    let trading_days = closes.trading_days();

    rounds
        .iter()
        .map(|round| {
            let resolved = resolve_trading_day(round.date, &trading_days);
            let trading_date = resolved.unwrap_or(round.date);
            AlignedRound {
                round: round.clone(),
                trading_date,
                close: resolved.and_then(|d| closes.close_on(d)),
            }
        })
        .collect()
}
