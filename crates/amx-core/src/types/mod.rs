//! 거래소 원시 값 처리를 위한 공통 타입.

pub mod lenient;
mod numeric;

pub use numeric::*;
