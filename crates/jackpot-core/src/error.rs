//! 비교 계산의 에러 타입.

use crate::domain::ProviderError;
use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 입력 데이터 없음
    #[error("입력 데이터 없음: {0}")]
    EmptyInput(String),

    /// 시세 제공자 에러
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// 비교 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;
