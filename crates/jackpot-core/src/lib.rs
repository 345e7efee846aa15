//! # Jackpot Core
//!
//! 로또 풀 결과와 주가 지수를 비교하기 위한 핵심 도메인 모델 및 계산을 제공합니다.
//!
//! - 로또 회차, 지수 종가, 비교 결과 타입
//! - 추첨일 → 거래일 매칭
//! - 누적 구매 금액/당첨금 및 수익률 계산
//! - 시세 제공자 추상화
//! - 실행 설정과 로깅 인프라

pub mod analysis;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use analysis::{build_comparison, AlignedRound};
pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
