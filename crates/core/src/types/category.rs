//! Expense categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown category value.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown expense category: {0}")]
pub struct ParseCategoryError(pub String);

/// The fixed set of expense categories.
///
/// The three `Custom*` slots are free-form buckets users can repurpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Gifts,
    HealthMedical,
    Home,
    Transportation,
    Personal,
    Pets,
    Utilities,
    Travel,
    Debt,
    Other,
    #[serde(rename = "custom_1")]
    Custom1,
    #[serde(rename = "custom_2")]
    Custom2,
    #[serde(rename = "custom_3")]
    Custom3,
}

impl ExpenseCategory {
    /// Every category, in form-display order.
    pub const ALL: [Self; 14] = [
        Self::Food,
        Self::Gifts,
        Self::HealthMedical,
        Self::Home,
        Self::Transportation,
        Self::Personal,
        Self::Pets,
        Self::Utilities,
        Self::Travel,
        Self::Debt,
        Self::Other,
        Self::Custom1,
        Self::Custom2,
        Self::Custom3,
    ];

    /// The wire/storage value for this category.
    #[must_use]
    pub const fn value(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Gifts => "gifts",
            Self::HealthMedical => "health_medical",
            Self::Home => "home",
            Self::Transportation => "transportation",
            Self::Personal => "personal",
            Self::Pets => "pets",
            Self::Utilities => "utilities",
            Self::Travel => "travel",
            Self::Debt => "debt",
            Self::Other => "other",
            Self::Custom1 => "custom_1",
            Self::Custom2 => "custom_2",
            Self::Custom3 => "custom_3",
        }
    }

    /// Human-readable label for form select options.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Gifts => "Gifts",
            Self::HealthMedical => "Health/Medical",
            Self::Home => "Home",
            Self::Transportation => "Transportation",
            Self::Personal => "Personal",
            Self::Pets => "Pets",
            Self::Utilities => "Utilities",
            Self::Travel => "Travel",
            Self::Debt => "Debt",
            Self::Other => "Other",
            Self::Custom1 => "Custom Category 1",
            Self::Custom2 => "Custom Category 2",
            Self::Custom3 => "Custom Category 3",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|category| category.value() == s)
            .copied()
            .ok_or_else(|| ParseCategoryError(s.to_owned()))
    }
}

// SQLx support (with postgres feature): stored as TEXT
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for ExpenseCategory {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for ExpenseCategory {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for ExpenseCategory {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.value(), buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_roundtrip() {
        for category in ExpenseCategory::ALL {
            assert_eq!(
                category.value().parse::<ExpenseCategory>().ok(),
                Some(category)
            );
        }
    }

    #[test]
    fn test_custom_slots_use_underscored_values() {
        assert_eq!(ExpenseCategory::Custom1.value(), "custom_1");
        assert_eq!(
            "custom_3".parse::<ExpenseCategory>().ok(),
            Some(ExpenseCategory::Custom3)
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert!("groceries".parse::<ExpenseCategory>().is_err());
    }
}
