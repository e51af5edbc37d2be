//! Currency codes supported by the expense and stock forms.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown currency code.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown currency code: {0}")]
pub struct ParseCurrencyError(pub String);

/// The fixed set of currencies the application accepts.
///
/// Values of differing currencies are displayed side by side and summed
/// without conversion; `Other` exists for holdings outside the listed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    AED,
    INR,
    USD,
    EUR,
    GBP,
    Other,
}

impl Currency {
    /// Every supported currency, in form-display order.
    pub const ALL: [Self; 6] = [
        Self::AED,
        Self::INR,
        Self::USD,
        Self::EUR,
        Self::GBP,
        Self::Other,
    ];

    /// The wire/storage code for this currency.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AED => "AED",
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::Other => "Other",
        }
    }

    /// The currency symbol used for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::AED => "\u{62f}.\u{625}",
            Self::INR => "\u{20b9}",
            Self::USD => "$",
            Self::EUR => "\u{20ac}",
            Self::GBP => "\u{a3}",
            Self::Other => "",
        }
    }

    /// Human-readable label for form select options.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AED => "AED (\u{62f}.\u{625})",
            Self::INR => "INR (\u{20b9})",
            Self::USD => "USD ($)",
            Self::EUR => "EUR (\u{20ac})",
            Self::GBP => "GBP (\u{a3})",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = ParseCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AED" => Ok(Self::AED),
            "INR" => Ok(Self::INR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "Other" => Ok(Self::Other),
            other => Err(ParseCurrencyError(other.to_owned())),
        }
    }
}

// SQLx support (with postgres feature): stored as TEXT
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Currency {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Currency {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Currency {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.code(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for currency in Currency::ALL {
            assert_eq!(currency.code().parse::<Currency>().ok(), Some(currency));
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert!("JPY".parse::<Currency>().is_err());
        assert!("aed".parse::<Currency>().is_err());
    }

    #[test]
    fn test_default_is_aed() {
        assert_eq!(Currency::default(), Currency::AED);
    }
}
