//! # Currency & Locale Module
//!
//! The fixed currency/language enumerations a shop profile can choose from,
//! and the pure display formatter for monetary amounts.
//!
//! ## Display Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              formatCurrency(amount, code)                               │
//! │                                                                         │
//! │  "<symbol> <grouped-number>"                                            │
//! │                                                                         │
//! │  USD  →  "$ 1,234.5"       known code: mapped symbol                    │
//! │  EUR  →  "€ 1,234.5"                                                    │
//! │  CDF  →  "FC 1,234.5"      Congolese franc                              │
//! │  XYZ  →  "XYZ 1,234.5"     unknown code: the raw code stands in         │
//! │                                                                         │
//! │  Whole units are grouped with commas; fractional cents are printed      │
//! │  only when non-zero, with trailing zeros trimmed (1,234.5 not          │
//! │  1,234.50). Formatting never changes the stored amount.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Currency
// =============================================================================

/// Currencies a user profile can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar.
    #[default]
    Usd,
    /// Euro.
    Eur,
    /// Congolese franc.
    Cdf,
}

impl Currency {
    /// The ISO 4217 code for this currency.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Cdf => "CDF",
        }
    }

    /// The display symbol for this currency.
    #[inline]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Cdf => "FC",
        }
    }

    /// Formats an amount in this currency.
    ///
    /// ## Example
    /// ```rust
    /// use duka_core::currency::Currency;
    /// use duka_core::money::Money;
    ///
    /// assert_eq!(Currency::Cdf.format(Money::from_cents(350_000)), "FC 3,500");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        format_currency(amount, self.code())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "CDF" => Ok(Currency::Cdf),
            other => Err(format!("unknown currency code: {other}")),
        }
    }
}

// =============================================================================
// Language
// =============================================================================

/// Interface languages a user profile can select.
///
/// The core only carries the preference; translation tables belong to the
/// presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French (default).
    #[default]
    Fr,
    /// English.
    En,
    /// Swahili.
    Sw,
}

impl Language {
    /// The ISO 639-1 code for this language.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Sw => "sw",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            "sw" => Ok(Language::Sw),
            other => Err(format!("unknown language code: {other}")),
        }
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats a monetary amount for display: `"<symbol> <grouped-number>"`.
///
/// Unrecognised codes fall back to printing the code itself in the symbol
/// position, so a forward-compatible profile value still renders something
/// sensible.
///
/// ## Example
/// ```rust
/// use duka_core::currency::format_currency;
/// use duka_core::money::Money;
///
/// assert_eq!(format_currency(Money::from_cents(123_450), "USD"), "$ 1,234.5");
/// assert_eq!(format_currency(Money::from_cents(123_450), "XYZ"), "XYZ 1,234.5");
/// ```
pub fn format_currency(amount: Money, code: &str) -> String {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "CDF" => "FC",
        other => other,
    };

    format!("{} {}", symbol, grouped_amount(amount))
}

/// Renders an amount with comma-grouped whole units and a trimmed fraction.
fn grouped_amount(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    let units = group_thousands(amount.units().abs());

    // Trailing zeros are trimmed from the fraction: 1,234.50 prints as
    // 1,234.5 and 1,234.00 as 1,234.
    let frac = amount.cents_part();
    if frac == 0 {
        format!("{sign}{units}")
    } else if frac % 10 == 0 {
        format!("{sign}{units}.{}", frac / 10)
    } else {
        format!("{sign}{units}.{frac:02}")
    }
}

/// Inserts a comma every three digits, right to left.
fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================
