//! 로또 풀/지수 비교 CLI.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 로또 결과와 지수 종가를 불러와 비교 테이블 생성
//! - 비교 차트 이미지 렌더링

pub mod chart;
pub mod commands;

pub use chart::{ChartConfig, ComparisonChartGenerator};
pub use commands::compare::{load_comparison, run_comparison, ComparisonSummary};
