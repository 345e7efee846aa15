//! 로또 풀과 지수 비교를 위한 도메인 모델.

mod comparison;
mod lottery;
mod market_data;
mod market_provider;

pub use comparison::*;
pub use lottery::*;
pub use market_data::*;
pub use market_provider::*;
