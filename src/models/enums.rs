use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Specialty {
    InternalMedicine => "internal_medicine",
    GeneralMedicine => "general_medicine",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn specialty_storage_strings() {
        for (variant, s) in [
            (Specialty::InternalMedicine, "internal_medicine"),
            (Specialty::GeneralMedicine, "general_medicine"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Specialty::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn specialty_serializes_as_storage_string() {
        let json = serde_json::to_string(&Specialty::GeneralMedicine).unwrap();
        assert_eq!(json, "\"general_medicine\"");
        let parsed: Specialty = serde_json::from_str("\"internal_medicine\"").unwrap();
        assert_eq!(parsed, Specialty::InternalMedicine);
    }

    #[test]
    fn invalid_specialty_returns_error() {
        let err = Specialty::from_str("cardiology").unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
        assert!(Specialty::from_str("").is_err());
    }
}
