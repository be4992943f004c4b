use crate::config::env_setting;
use crate::fiat_amount::FiatAmount;
use crate::fiat_amount::FiatAmountError;
use crate::fiat_currency::FiatCurrency;
use serde::Deserialize;
use serde::Serialize;
use std::str::FromStr;

/// The digit grouping rules used when rendering amounts.
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, strum::EnumString, strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum NumberLocale {
    /// Indonesian: `1.234.567,89`
    #[default]
    #[strum(serialize = "id-ID", serialize = "id")]
    IdId,
    /// US English: `1,234,567.89`
    #[strum(serialize = "en-US", serialize = "en")]
    EnUs,
}

impl NumberLocale {
    pub fn group_separator(&self) -> char {
        match self {
            Self::IdId => '.',
            Self::EnUs => ',',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            Self::IdId => ',',
            Self::EnUs => '.',
        }
    }
}

/// How prices are rendered: which currency, which locale, and how many
/// fractional digits.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct DisplayPreference {
    pub currency: FiatCurrency,
    pub locale: NumberLocale,
    pub fraction_digits: u8,
}

impl DisplayPreference {
    /// Whole rupiah, Indonesian grouping. Every place price is quoted in it.
    pub const IDR: Self = Self {
        currency: FiatCurrency::IDR,
        locale: NumberLocale::IdId,
        fraction_digits: 0,
    };

    /// Creates a DisplayPreference from environment variables, falling back
    /// to [`DisplayPreference::IDR`] for anything unset or unparseable.
    ///
    /// # Environment Variables
    /// - `ECOTOUR_CURRENCY`: ISO code, e.g. "IDR" or "USD".
    /// - `ECOTOUR_LOCALE`: "id-ID" or "en-US".
    pub fn from_env() -> Self {
        let currency = env_setting("ECOTOUR_CURRENCY", option_env!("ECOTOUR_CURRENCY"))
            .and_then(|s| FiatCurrency::from_str(&s).ok())
            .unwrap_or(Self::IDR.currency);

        let locale = env_setting("ECOTOUR_LOCALE", option_env!("ECOTOUR_LOCALE"))
            .and_then(|s| NumberLocale::from_str(&s).ok())
            .unwrap_or(Self::IDR.locale);

        Self {
            currency,
            locale,
            fraction_digits: Self::IDR.fraction_digits,
        }
    }

    /// Renders a positive amount as a currency string.
    pub fn format_price(&self, value: f64) -> Result<String, FiatAmountError> {
        let amount = FiatAmount::new_from_float(value, self.currency)?;
        Ok(amount.to_localized_string(self.locale, self.fraction_digits))
    }
}

impl Default for DisplayPreference {
    fn default() -> Self {
        Self::IDR
    }
}
