//! Yahoo Finance 일별 종가 제공자.
//!
//! `yahoo_finance_api`로 지정 날짜부터 현재까지의 일봉을 조회하고
//! 종가만 [`MarketObservation`]으로 변환합니다.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use jackpot_core::{ClosingSeries, MarketDataProvider, MarketObservation, ProviderError};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api::YahooConnector;

/// 일봉 interval.
const DAILY_INTERVAL: &str = "1d";

/// Yahoo Finance 기반 시세 제공자.
pub struct YahooMarketProvider {
    connector: YahooConnector,
}

impl YahooMarketProvider {
    pub fn new() -> Result<Self, ProviderError> {
        let connector = YahooConnector::new()
            .map_err(|e| ProviderError::Fetch(format!("Yahoo Finance 연결 실패: {}", e)))?;
        Ok(Self { connector })
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketProvider {
    async fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
    ) -> Result<Vec<MarketObservation>, ProviderError> {
        if ticker.trim().is_empty() {
            return Err(ProviderError::InvalidRequest("빈 티커".to_string()));
        }

        let start_time = naive_date_to_offset_datetime(start)?;
        let end_time = OffsetDateTime::now_utc();
        if start_time >= end_time {
            return Err(ProviderError::InvalidRequest(format!(
                "시작일이 미래입니다: {}",
                start
            )));
        }

        debug!(ticker = ticker, start = %start, interval = DAILY_INTERVAL, "Yahoo Finance API 날짜 범위 호출");

        let response = self
            .connector
            .get_quote_history_interval(ticker, start_time, end_time, DAILY_INTERVAL)
            .await
            .map_err(|e| ProviderError::Fetch(format!("Yahoo Finance API 오류 ({}): {}", ticker, e)))?;

        let quotes = response
            .quotes()
            .map_err(|e| ProviderError::Parse(format!("Quote 파싱 오류: {}", e)))?;

        let raw_count = quotes.len();
        let observations =
            closes_to_observations(quotes.iter().map(|q| (q.timestamp as i64, q.close)));

        if observations.len() < raw_count {
            warn!(
                ticker = ticker,
                dropped = raw_count - observations.len(),
                "유효하지 않거나 중복된 종가 제외"
            );
        }

        if observations.is_empty() {
            return Err(ProviderError::Empty(format!("{} since {}", ticker, start)));
        }

        debug!(ticker = ticker, count = observations.len(), "종가 조회 완료");
        Ok(observations)
    }

    fn source_name(&self) -> &str {
        "Yahoo Finance"
    }
}

/// (Unix timestamp, 종가) 목록을 날짜별 종가로 변환.
///
/// 유한하지 않거나 0 이하인 종가는 버리고, 타임스탬프는 UTC 날짜로
/// 변환합니다. 같은 날짜가 여러 번 나오면 마지막 값을 사용하며 결과는
/// 날짜 오름차순입니다.
pub fn closes_to_observations(
    quotes: impl IntoIterator<Item = (i64, f64)>,
) -> Vec<MarketObservation> {
    let observations: Vec<MarketObservation> = quotes
        .into_iter()
        .filter(|(_, close)| close.is_finite() && *close > 0.0)
        .filter_map(|(timestamp, close)| {
            let date = Utc.timestamp_opt(timestamp, 0).single()?.date_naive();
            let close = Decimal::from_f64(close)?;
            Some(MarketObservation::new(date, close))
        })
        .collect();

    ClosingSeries::from_observations(&observations).into_observations()
}

/// NaiveDate를 UTC 자정의 OffsetDateTime으로 변환.
fn naive_date_to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime, ProviderError> {
    let invalid = |e: time::error::ComponentRange| {
        ProviderError::InvalidRequest(format!("날짜 변환 실패 ({}): {}", date, e))
    };

    let month = time::Month::try_from(date.month() as u8).map_err(invalid)?;
    let day = time::Date::from_calendar_date(date.year(), month, date.day() as u8).map_err(invalid)?;
    Ok(day.midnight().assume_utc())
}
