//! 金额工具 - centavos (整数) 与 Decimal 的精确换算
//!
//! 数据库中所有金额以整数 centavos 存储，避免浮点误差。
//! JSON 边界使用 `rust_decimal::Decimal`（两位小数，half-up 舍入）。

use rust_decimal::prelude::*;
use thiserror::Error;

/// 金额小数位数
const DECIMAL_PLACES: u32 = 2;

/// 单价上限 (R$ 1.000.000,00, centavos)
pub const MAX_PRECO_CENTAVOS: i64 = 100_000_000;

/// 单项数量上限
pub const MAX_QUANTIDADE: i64 = 9999;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("valor must be a finite non-negative amount")]
    Negative,

    #[error("valor exceeds the maximum allowed amount")]
    TooLarge,
}

/// centavos -> Decimal (ex.: 1050 -> 10.50)
pub fn centavos_para_decimal(centavos: i64) -> Decimal {
    Decimal::new(centavos, DECIMAL_PLACES)
}

/// Decimal -> centavos, rounding half-up to two places.
///
/// Rejects negative amounts and amounts above [`MAX_PRECO_CENTAVOS`].
pub fn decimal_para_centavos(valor: Decimal) -> Result<i64, MoneyError> {
    if valor.is_sign_negative() {
        return Err(MoneyError::Negative);
    }
    let arredondado = valor.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    let centavos = (arredondado * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or(MoneyError::TooLarge)?;
    if centavos > MAX_PRECO_CENTAVOS {
        return Err(MoneyError::TooLarge);
    }
    Ok(centavos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_trip_two_places() {
        let d = centavos_para_decimal(1050);
        assert_eq!(d.to_string(), "10.50");
        assert_eq!(decimal_para_centavos(d).unwrap(), 1050);
    }

    #[test]
    fn rounds_half_up() {
        let d = Decimal::from_str("10.005").unwrap();
        assert_eq!(decimal_para_centavos(d).unwrap(), 1001);
    }

    #[test]
    fn rejects_negative() {
        let d = Decimal::from_str("-1.00").unwrap();
        assert_eq!(decimal_para_centavos(d), Err(MoneyError::Negative));
    }

    #[test]
    fn rejects_over_maximum() {
        let d = Decimal::from_str("1000000.01").unwrap();
        assert_eq!(decimal_para_centavos(d), Err(MoneyError::TooLarge));
    }
}
