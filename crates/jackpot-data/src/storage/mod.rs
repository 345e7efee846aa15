//! 로컬 파일 기반 데이터 소스.

pub mod lottery_sheet;
