//! 지수 시장 데이터 타입.

use crate::types::Price;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 하루치 지수 종가.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketObservation {
    /// 거래일
    pub date: NaiveDate,
    /// 종가
    pub close: Price,
}

impl MarketObservation {
    /// 새 관측값을 생성합니다.
    pub fn new(date: NaiveDate, close: Price) -> Self {
        Self { date, close }
    }
}

/// 거래일 → 종가 시계열.
///
/// 날짜 오름차순이며 날짜당 하나의 종가만 가집니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosingSeries {
    closes: BTreeMap<NaiveDate, Price>,
}

impl ClosingSeries {
    /// 관측값 목록으로 시계열을 만듭니다. 같은 날짜가 여러 번 나오면 마지막 값이 남습니다.
    pub fn from_observations(observations: &[MarketObservation]) -> Self {
        let closes = observations.iter().map(|o| (o.date, o.close)).collect();
        Self { closes }
    }

    /// 거래일 개수.
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// 해당 거래일의 종가.
    pub fn close_on(&self, date: NaiveDate) -> Option<Price> {
        self.closes.get(&date).copied()
    }

    /// 마지막 거래일.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.closes.keys().next_back().copied()
    }

    /// 거래일 집합.
    pub fn trading_days(&self) -> BTreeSet<NaiveDate> {
        self.closes.keys().copied().collect()
    }

    /// 날짜순 관측값 목록으로 변환합니다.
    pub fn into_observations(self) -> Vec<MarketObservation> {
        self.closes
            .into_iter()
            .map(|(date, close)| MarketObservation { date, close })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_closing_series_sorts_and_dedups() {
        let series = ClosingSeries::from_observations(&[
            MarketObservation::new(date(5), dec!(105)),
            MarketObservation::new(date(2), dec!(100)),
            MarketObservation::new(date(5), dec!(106)),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.trading_days().into_iter().next(), Some(date(2)));
        assert_eq!(series.last_date(), Some(date(5)));
        assert_eq!(series.close_on(date(5)), Some(dec!(106)));
        assert_eq!(series.close_on(date(3)), None);
    }

    #[test]
    fn test_into_observations_is_chronological() {
        let series = ClosingSeries::from_observations(&[
            MarketObservation::new(date(9), dec!(1)),
            MarketObservation::new(date(1), dec!(2)),
        ]);
        let dates: Vec<_> = series.into_observations().iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![date(1), date(9)]);
    }
}
