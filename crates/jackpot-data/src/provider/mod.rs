//! 데이터 Provider 모듈.
//!
//! 원격 소스에서 지수 시세를 가져오는 Provider들을 정의합니다.
//!
//! ## Yahoo Finance
//! - `YahooMarketProvider`: 일별 종가 조회 (`jackpot_core::MarketDataProvider` 구현)
//! - 기본 티커 `^OMXH25` (OMX Helsinki 25)

pub mod yahoo;

pub use yahoo::YahooMarketProvider;
