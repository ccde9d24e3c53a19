//! 채권 분석 도메인 모델.

mod bond;
mod calculations;
mod frequency;
mod quote;
mod ranking;

pub use bond::*;
pub use calculations::*;
pub use frequency::*;
pub use quote::*;
pub use ranking::*;
