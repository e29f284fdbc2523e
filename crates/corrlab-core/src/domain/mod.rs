//! 분석용 도메인 모델.

mod rounding;
mod series;

pub use rounding::*;
pub use series::*;
