//! Shared domain enums stored as text labels

use serde::{Deserialize, Serialize};
use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{SqliteArgumentValue, SqliteTypeInfo, SqliteValueRef},
    Decode, Encode, Sqlite,
};
use utoipa::ToSchema;

/// Implements sqlx text conversion through `as_str` / `FromStr`
macro_rules! sqlite_text_enum {
    ($ty:ty) => {
        impl sqlx::Type<Sqlite> for $ty {
            fn type_info() -> SqliteTypeInfo {
                <str as sqlx::Type<Sqlite>>::type_info()
            }

            fn compatible(ty: &SqliteTypeInfo) -> bool {
                <str as sqlx::Type<Sqlite>>::compatible(ty)
            }
        }

        impl<'r> Decode<'r, Sqlite> for $ty {
            fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
                let s = <&str as Decode<Sqlite>>::decode(value)?;
                s.parse().map_err(|e: String| e.into())
            }
        }

        impl<'q> Encode<'q, Sqlite> for $ty {
            fn encode_by_ref(&self, buf: &mut Vec<SqliteArgumentValue<'q>>) -> IsNull {
                <&str as Encode<'q, Sqlite>>::encode(self.as_str(), buf)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Equipment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    #[serde(rename = "Digital Camera")]
    DigitalCamera,
    #[serde(rename = "Film Camera")]
    FilmCamera,
    Lens,
    Lighting,
    Tripod,
    Projector,
    Audio,
    Others,
}

impl Category {
    /// All categories, in form display order
    pub const ALL: [Category; 8] = [
        Category::DigitalCamera,
        Category::FilmCamera,
        Category::Lens,
        Category::Lighting,
        Category::Tripod,
        Category::Projector,
        Category::Audio,
        Category::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DigitalCamera => "Digital Camera",
            Category::FilmCamera => "Film Camera",
            Category::Lens => "Lens",
            Category::Lighting => "Lighting",
            Category::Tripod => "Tripod",
            Category::Projector => "Projector",
            Category::Audio => "Audio",
            Category::Others => "Others",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid category: {}", s))
    }
}

sqlite_text_enum!(Category);

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a loan record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Returned,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Returned => "returned",
        }
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LoanStatus::Active),
            "returned" => Ok(LoanStatus::Returned),
            _ => Err(format!("Invalid loan status: {}", s)),
        }
    }
}

sqlite_text_enum!(LoanStatus);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(Category::DigitalCamera.to_string(), "Digital Camera");
        assert_eq!("film camera".parse::<Category>(), Ok(Category::FilmCamera));
        assert!("Drone".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_uses_labels() {
        let json = serde_json::to_string(&Category::FilmCamera).unwrap();
        assert_eq!(json, "\"Film Camera\"");
        let back: Category = serde_json::from_str("\"Digital Camera\"").unwrap();
        assert_eq!(back, Category::DigitalCamera);
    }

    #[test]
    fn test_loan_status() {
        assert_eq!("returned".parse::<LoanStatus>(), Ok(LoanStatus::Returned));
        assert_eq!(serde_json::to_string(&LoanStatus::Active).unwrap(), "\"active\"");
    }
}
