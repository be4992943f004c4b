//! Defines the fiat currencies place prices can be displayed in.

use serde::Deserialize;
use serde::Serialize;

/// Represents a fiat currency, containing its code, symbol, and minor-unit rules.
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Default,
    strum::EnumIs,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
pub enum FiatCurrency {
    #[default]
    IDR, // Indonesian Rupiah
    MYR, // Malaysian Ringgit
    SGD, // Singapore Dollar
    THB, // Thai Baht
    JPY, // Japanese Yen
    EUR, // Euro
    USD, // United States Dollar
}

impl FiatCurrency {
    /// Returns the number of decimal digits of the currency's minor unit.
    ///
    /// The rupiah keeps its ISO 4217 exponent of 2 even though prices are
    /// normally shown without sen.
    pub const fn decimals(&self) -> u8 {
        match self {
            Self::JPY => 0,
            _ => 2,
        }
    }

    /// Returns the graphical symbol for the currency (e.g., "Rp").
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::IDR => "Rp",
            Self::MYR => "RM",
            Self::SGD => "S$",
            Self::THB => "฿",
            Self::JPY => "¥",
            Self::EUR => "€",
            Self::USD => "$",
        }
    }

    /// Returns the ISO 4217 string code for the currency (e.g., "IDR").
    pub fn code(&self) -> &'static str {
        self.into()
    }
}
