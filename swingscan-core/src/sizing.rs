//! Position sizing: how many whole shares the available capital buys.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SizingError {
    #[error("cannot size a position at non-positive or non-finite price {price}")]
    InvalidPrice { price: f64 },
}

/// floor(capital / price), never negative, with `lot * price <= capital`.
pub fn lot_size(capital: f64, price: f64) -> Result<u64, SizingError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(SizingError::InvalidPrice { price });
    }
    if !capital.is_finite() || capital <= 0.0 {
        return Ok(0);
    }

    let mut lots = (capital / price).floor() as u64;
    // Float division can round a quotient just below an integer up to it.
    while lots > 0 && lots as f64 * price > capital {
        lots -= 1;
    }
    Ok(lots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_shares_only() {
        assert_eq!(lot_size(100_000.0, 333.0), Ok(300));
        assert_eq!(lot_size(100_000.0, 100_001.0), Ok(0));
        assert_eq!(lot_size(100.0, 25.0), Ok(4));
    }

    #[test]
    fn rejects_bad_price() {
        assert!(lot_size(100_000.0, 0.0).is_err());
        assert!(lot_size(100_000.0, -5.0).is_err());
        assert!(lot_size(100_000.0, f64::NAN).is_err());
    }

    #[test]
    fn negative_capital_buys_nothing() {
        assert_eq!(lot_size(-10.0, 5.0), Ok(0));
    }
}
