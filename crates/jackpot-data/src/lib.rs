//! 입력 데이터 로딩.
//!
//! 이 crate는 다음을 제공합니다:
//! - 로또 풀 결과 파일 로더 (xlsx/xls/ods 및 CSV)
//! - Yahoo Finance 기반 지수 일별 종가 제공자

pub mod error;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};

// 로또 결과 로더 재내보내기
pub use storage::lottery_sheet::load_lottery_rounds;

// 시세 Provider 재내보내기
pub use provider::YahooMarketProvider;
