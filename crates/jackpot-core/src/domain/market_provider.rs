//! 지수 시세 제공자 추상화.
//!
//! 원격 시세 소스(Yahoo Finance 등)로부터 일별 종가를 조회하기 위한
//! 소스 중립적인 인터페이스를 제공합니다.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use super::{ClosingSeries, MarketObservation};

// =============================================================================
// 에러 타입
// =============================================================================

/// MarketDataProvider 에러.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 네트워크/요청 에러
    #[error("시세 조회 실패: {0}")]
    Fetch(String),

    /// 응답 파싱 에러
    #[error("시세 파싱 실패: {0}")]
    Parse(String),

    /// 빈 응답
    #[error("시세 데이터 없음: {0}")]
    Empty(String),

    /// 잘못된 요청 (심볼, 날짜 범위 등)
    #[error("잘못된 요청: {0}")]
    InvalidRequest(String),
}

// =============================================================================
// MarketDataProvider Trait
// =============================================================================

/// 일별 종가 제공자 trait.
///
/// # 구현 예시
///
/// ```ignore
/// pub struct YahooMarketProvider {
///     connector: YahooConnector,
/// }
///
/// #[async_trait]
/// impl MarketDataProvider for YahooMarketProvider {
///     async fn daily_closes(&self, ticker: &str, start: NaiveDate)
///         -> Result<Vec<MarketObservation>, ProviderError> {
///         // Yahoo Finance API 호출 및 변환
///     }
///
///     fn source_name(&self) -> &str { "Yahoo Finance" }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// `start`부터 현재까지의 일별 종가 조회.
    ///
    /// # Returns
    ///
    /// 날짜 오름차순, 날짜당 하나의 관측값.
    ///
    /// # Errors
    ///
    /// - `ProviderError::Fetch`: 원격 소스 접근 실패
    /// - `ProviderError::Parse`: 응답 형식 오류
    /// - `ProviderError::Empty`: 조회 결과 없음
    async fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
    ) -> Result<Vec<MarketObservation>, ProviderError>;

    /// 데이터 소스 이름 (로깅용).
    fn source_name(&self) -> &str;
}

// =============================================================================
// 고정 데이터 제공자
// =============================================================================

/// 메모리에 있는 관측값을 그대로 돌려주는 제공자.
///
/// 오프라인 실행과 테스트에 사용합니다.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketProvider {
    observations: Vec<MarketObservation>,
}

impl StaticMarketProvider {
    pub fn new(observations: Vec<MarketObservation>) -> Self {
        Self { observations }
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketProvider {
    async fn daily_closes(
        &self,
        ticker: &str,
        start: NaiveDate,
    ) -> Result<Vec<MarketObservation>, ProviderError> {
        let observations: Vec<MarketObservation> = ClosingSeries::from_observations(&self.observations)
            .into_observations()
            .into_iter()
            .filter(|o| o.date >= start)
            .collect();

        if observations.is_empty() {
            return Err(ProviderError::Empty(format!("{} since {}", ticker, start)));
        }
        Ok(observations)
    }

    fn source_name(&self) -> &str {
        "static"
    }
}

// =============================================================================
// 테스트
// =============================================================================
