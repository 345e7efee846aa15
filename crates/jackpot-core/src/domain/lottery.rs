//! 로또 회차 데이터.

use crate::types::Price;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 로또 풀의 한 회차 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotteryRound {
    /// 추첨일
    pub date: NaiveDate,
    /// 구매 금액
    pub price: Price,
    /// 당첨금
    pub win: Price,
}

impl LotteryRound {
    /// 새 회차를 생성합니다.
    pub fn new(date: NaiveDate, price: Price, win: Price) -> Self {
        Self { date, price, win }
    }
}

/// 회차 목록을 날짜순으로 정렬합니다.
///
/// 같은 날짜의 회차는 입력 순서를 유지합니다.
pub fn sort_rounds(rounds: &mut [LotteryRound]) {
    rounds.sort_by_key(|r| r.date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_sort_rounds_is_stable() {
        let mut rounds = vec![
            LotteryRound::new(date(9), dec!(10), dec!(0)),
            LotteryRound::new(date(2), dec!(10), dec!(1)),
            LotteryRound::new(date(2), dec!(10), dec!(2)),
        ];
        sort_rounds(&mut rounds);

        assert_eq!(rounds[0].win, dec!(1));
        assert_eq!(rounds[1].win, dec!(2));
        assert_eq!(rounds[2].date, date(9));
    }
}
