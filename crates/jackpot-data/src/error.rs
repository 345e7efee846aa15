//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 파일 접근 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 스프레드시트 읽기 오류
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// CSV 읽기 오류
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// 필수 컬럼 누락
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 잘못된 데이터 형식
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
