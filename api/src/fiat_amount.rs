//! Provides a safe, self-contained type for representing fiat currency amounts.

use thiserror::Error;

use crate::fiat_currency::FiatCurrency;
use crate::prefs::display_preference::NumberLocale;

/// An error that can occur when building a `FiatAmount` from a float.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FiatAmountError {
    /// The value is NaN or infinite.
    #[error("amount is not a finite number")]
    NotFinite,
    /// The value does not fit in the currency's minor units.
    #[error("amount is out of range for the currency")]
    OutOfRange,
}

/// Represents a monetary value in a specific fiat currency.
///
/// Internally, the amount is stored as a signed 64-bit integer in the currency's
/// smallest unit (e.g., sen for IDR) to prevent floating-point inaccuracies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiatAmount {
    amount: i64,
    currency: FiatCurrency,
}

impl FiatAmount {
    /// Returns the raw amount in the currency's smallest unit.
    pub fn as_minor_units(&self) -> i64 {
        self.amount
    }

    /// Creates a new `FiatAmount` from a floating-point value, typically from an API.
    ///
    /// The float is rounded to the nearest minor unit (half away from zero).
    ///
    /// # Examples
    /// ```
    /// use api::fiat_amount::FiatAmount;
    /// use api::fiat_currency::FiatCurrency;
    ///
    /// let amount = FiatAmount::new_from_float(123.456, FiatCurrency::USD).unwrap();
    /// assert_eq!(amount.as_minor_units(), 12346);
    /// ```
    pub fn new_from_float(value: f64, currency: FiatCurrency) -> Result<Self, FiatAmountError> {
        if !value.is_finite() {
            return Err(FiatAmountError::NotFinite);
        }
        let multiplier = 10_f64.powi(currency.decimals() as i32);
        let scaled = (value * multiplier).round();

        // i64::MAX as f64 is exactly 2^63, the first value that no longer fits.
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return Err(FiatAmountError::OutOfRange);
        }

        Ok(Self {
            amount: scaled as i64,
            currency,
        })
    }

    /// Formats the amount the way a locale-aware currency formatter would:
    /// symbol first, grouped major units, and at most `fraction_digits`
    /// fractional digits (rounded half away from zero).
    ///
    /// # Example
    /// ```
    /// use api::fiat_amount::FiatAmount;
    /// use api::fiat_currency::FiatCurrency;
    /// use api::prefs::display_preference::NumberLocale;
    ///
    /// let amount = FiatAmount::new_from_float(50_000.0, FiatCurrency::IDR).unwrap();
    /// assert_eq!(amount.to_localized_string(NumberLocale::IdId, 0), "Rp50.000");
    /// ```
    pub fn to_localized_string(&self, locale: NumberLocale, fraction_digits: u8) -> String {
        let decimals = self.currency.decimals();
        let shown = fraction_digits.min(decimals);

        let rounded = round_div(self.amount, 10_i64.pow((decimals - shown) as u32));
        let unit = 10_i64.pow(shown as u32);
        let major = (rounded / unit).unsigned_abs();
        let minor = (rounded % unit).unsigned_abs();

        let mut out = String::new();
        if rounded < 0 {
            out.push('-');
        }
        out.push_str(self.currency.symbol());
        out.push_str(&group_digits(major, locale.group_separator()));
        if shown > 0 {
            out.push(locale.decimal_separator());
            out.push_str(&format!("{:0width$}", minor, width = shown as usize));
        }
        out
    }
}

/// Divides, rounding half away from zero.
fn round_div(value: i64, divisor: i64) -> i64 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    if remainder.unsigned_abs() * 2 >= divisor.unsigned_abs() {
        quotient + value.signum()
    } else {
        quotient
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_floats_to_minor_units() {
        let amount = FiatAmount::new_from_float(25_000.25, FiatCurrency::IDR).unwrap();
        assert_eq!(amount.as_minor_units(), 2_500_025);
        assert_eq!(amount.to_localized_string(NumberLocale::EnUs, 2), "Rp25,000.25");
    }

    #[test]
    fn rejects_values_it_cannot_hold() {
        assert_eq!(
            FiatAmount::new_from_float(f64::NAN, FiatCurrency::IDR),
            Err(FiatAmountError::NotFinite)
        );
        assert_eq!(
            FiatAmount::new_from_float(1e20, FiatCurrency::IDR),
            Err(FiatAmountError::OutOfRange)
        );
    }

    #[test]
    fn whole_unit_rupiah_uses_dot_grouping() {
        let amount = FiatAmount::new_from_float(1_234_567.0, FiatCurrency::IDR).unwrap();
        assert_eq!(amount.to_localized_string(NumberLocale::IdId, 0), "Rp1.234.567");

        let small = FiatAmount::new_from_float(950.0, FiatCurrency::IDR).unwrap();
        assert_eq!(small.to_localized_string(NumberLocale::IdId, 0), "Rp950");
    }

    #[test]
    fn half_units_round_away_from_zero() {
        let up = FiatAmount::new_from_float(2_500.5, FiatCurrency::IDR).unwrap();
        assert_eq!(up.to_localized_string(NumberLocale::IdId, 0), "Rp2.501");

        let down = FiatAmount::new_from_float(2_500.49, FiatCurrency::IDR).unwrap();
        assert_eq!(down.to_localized_string(NumberLocale::IdId, 0), "Rp2.500");
    }

    #[test]
    fn fraction_digits_follow_locale_separators() {
        let amount = FiatAmount::new_from_float(1_999.5, FiatCurrency::USD).unwrap();
        assert_eq!(amount.to_localized_string(NumberLocale::EnUs, 2), "$1,999.50");
        assert_eq!(amount.to_localized_string(NumberLocale::IdId, 2), "$1.999,50");
    }

    #[test]
    fn fraction_digits_are_capped_by_the_currency() {
        let yen = FiatAmount::new_from_float(1_500.0, FiatCurrency::JPY).unwrap();
        assert_eq!(yen.to_localized_string(NumberLocale::EnUs, 2), "¥1,500");
    }
}
