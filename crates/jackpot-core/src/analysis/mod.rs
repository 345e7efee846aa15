//! 회차-거래일 정렬 및 수익률 계산.
//!
//! # 처리 흐름
//!
//! ```text
//! LotteryRound[] ──┐
//!                  ├─► align_rounds ─► AlignedRound[] ─► compute_returns ─► ComparisonTable
//! MarketObservation[] ┘
//! ```

mod alignment;
mod returns;

pub use alignment::*;
pub use returns::*;

use crate::domain::{sort_rounds, ClosingSeries, ComparisonTable, LotteryRound, MarketObservation};
use crate::error::{CoreError, CoreResult};
use tracing::{debug, warn};

/// 회차와 지수 종가로 비교 테이블을 생성합니다.
///
/// 회차는 날짜순으로 정렬한 뒤 처리하며, 입력이 같으면 항상 같은 결과를
/// 반환합니다.
pub fn build_comparison(
    rounds: &[LotteryRound],
    observations: &[MarketObservation],
) -> CoreResult<ComparisonTable> {
    if rounds.is_empty() {
        return Err(CoreError::EmptyInput("lottery rounds".to_string()));
    }
    if observations.is_empty() {
        return Err(CoreError::EmptyInput("market observations".to_string()));
    }

    let mut rounds = rounds.to_vec();
    sort_rounds(&mut rounds);

    let closes = ClosingSeries::from_observations(observations);
    let aligned = align_rounds(&rounds, &closes);
    let table = compute_returns(&aligned);

    let unmatched = table.unmatched_count();
    if unmatched > 0 {
        warn!(
            unmatched,
            last_trading_day = ?closes.last_date(),
            "Rounds after the last trading day have no index value"
        );
    }
    debug!(rows = table.len(), trading_days = closes.len(), "Comparison table built");

    Ok(table)
}
