//! 로또 회차와 지수 투자 비교 결과.

use crate::types::{Percentage, Price, Quantity};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 회차별 비교 결과 행.
///
/// 지수 관련 필드는 매칭되는 거래일이 없으면 `None`입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// 0부터 시작하는 회차 번호 (날짜순)
    pub round: usize,
    /// 추첨일
    pub date: NaiveDate,
    /// 구매 금액
    pub price: Price,
    /// 당첨금
    pub win: Price,
    /// 매칭된 거래일 (매칭 실패 시 추첨일 그대로)
    pub trading_date: NaiveDate,
    /// 매칭된 거래일 종가
    pub close: Option<Price>,
    /// 누적 구매 금액
    pub cumulative_spend: Price,
    /// 누적 당첨금
    pub cumulative_win: Price,
    /// 로또 누적 수익률 (%)
    pub lottery_return_pct: Option<Percentage>,
    /// 이번 회차 구매 금액으로 살 수 있는 지수 수량
    pub index_units: Option<Quantity>,
    /// 누적 지수 수량
    pub cumulative_units: Option<Quantity>,
    /// 지수 평가 금액
    pub index_value: Option<Price>,
    /// 지수 누적 수익률 (%)
    pub index_return_pct: Option<Percentage>,
}

impl ComparisonRow {
    /// 지수 종가와 매칭되었는지 여부.
    pub fn is_matched(&self) -> bool {
        self.close.is_some()
    }
}

/// 날짜순 비교 결과 테이블.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTable {
    rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn new(rows: Vec<ComparisonRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 마지막 회차.
    pub fn latest(&self) -> Option<&ComparisonRow> {
        self.rows.last()
    }

    /// 가장 최근 추첨일.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.rows.iter().map(|r| r.date).max()
    }

    /// 마지막 회차의 로또 수익률.
    pub fn latest_lottery_return(&self) -> Option<Percentage> {
        self.rows.last().and_then(|r| r.lottery_return_pct)
    }

    /// 값이 있는 마지막 지수 수익률.
    pub fn latest_index_return(&self) -> Option<Percentage> {
        self.rows.iter().rev().find_map(|r| r.index_return_pct)
    }

    /// 지수와 매칭되지 않은 회차 수.
    pub fn unmatched_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_matched()).count()
    }

    /// 회차별 로또 수익률.
    pub fn lottery_returns(&self) -> Vec<Option<Percentage>> {
        self.rows.iter().map(|r| r.lottery_return_pct).collect()
    }

    /// 회차별 지수 수익률.
    pub fn index_returns(&self) -> Vec<Option<Percentage>> {
        self.rows.iter().map(|r| r.index_return_pct).collect()
    }
}
