use crate::error::{ExchangeError, Result};
use alloy_primitives::U256;
use rust_decimal::Decimal;

/// Fixed-point precision of every token amount on the exchange
pub const TOKEN_DECIMALS: u32 = 18;

/// Largest mantissa a `Decimal` can carry
const DECIMAL_MANTISSA_BITS: usize = 96;

/// Convert an 18-decimal fixed point integer to a decimal quantity.
///
/// Trailing zero digits are folded into the scale first, so whole-token
/// amounts far above the 96-bit raw range still convert.
pub fn to_decimal_units(amount: U256) -> Result<Decimal> {
    let ten = U256::from(10u8);
    let mut mantissa = amount;
    let mut scale = TOKEN_DECIMALS;
    while scale > 0 && !mantissa.is_zero() && (mantissa % ten).is_zero() {
        mantissa /= ten;
        scale -= 1;
    }

    if mantissa.bit_len() > DECIMAL_MANTISSA_BITS {
        return Err(ExchangeError::AmountOverflow(amount));
    }

    let mantissa = mantissa.to::<u128>() as i128;
    Decimal::try_from_i128_with_scale(mantissa, scale)
        .map(|d| d.normalize())
        .map_err(|_| ExchangeError::AmountOverflow(amount))
}

/// Inverse of [`to_decimal_units`], used to build amounts from human quantities
pub fn from_decimal_units(quantity: Decimal) -> Result<U256> {
    let mut scaled = quantity;
    scaled.rescale(TOKEN_DECIMALS);
    if scaled.scale() != TOKEN_DECIMALS || scaled.is_sign_negative() {
        return Err(ExchangeError::invalid(
            "amount",
            format!("{quantity} cannot be represented with {TOKEN_DECIMALS} decimals"),
        ));
    }
    Ok(U256::from(scaled.mantissa() as u128))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_whole_and_fractional_units() {
        let one = U256::from(10u64).pow(U256::from(18u64));
        assert_eq!(to_decimal_units(one).unwrap(), Decimal::ONE);

        let half = one / U256::from(2u64);
        assert_eq!(to_decimal_units(half).unwrap(), Decimal::from_str("0.5").unwrap());

        assert_eq!(to_decimal_units(U256::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = U256::from(1u64) << 200;
        assert!(matches!(
            to_decimal_units(huge),
            Err(ExchangeError::AmountOverflow(_))
        ));

        // 10^30 + 1 wei needs 31 significant digits
        let dense = U256::from(10u64).pow(U256::from(30u64)) + U256::from(1u64);
        assert!(matches!(
            to_decimal_units(dense),
            Err(ExchangeError::AmountOverflow(_))
        ));
    }

    #[test]
    fn test_large_whole_amounts_convert() {
        let trillion_tokens = U256::from(10u64).pow(U256::from(30u64));
        assert_eq!(
            to_decimal_units(trillion_tokens).unwrap(),
            Decimal::from(1_000_000_000_000u64)
        );

        let round_lot = U256::from(1_234_500_000_000_000_000_000_000u128);
        assert_eq!(
            to_decimal_units(round_lot).unwrap(),
            Decimal::from_str("1234500").unwrap()
        );
    }

    #[test]
    fn test_from_decimal_units() {
        let amount = from_decimal_units(Decimal::from_str("3.14159").unwrap()).unwrap();
        assert_eq!(amount, U256::from(3_141_590_000_000_000_000u64));
        assert_eq!(to_decimal_units(amount).unwrap(), Decimal::from_str("3.14159").unwrap());

        assert!(from_decimal_units(Decimal::from_str("-1").unwrap()).is_err());
    }
}
