//! ABO/Rh blood-type codes and the static donor compatibility table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// One of the eight ABO/Rh combinations.
///
/// Variant order matches the lexical order of the codes, so a
/// `BTreeMap<BloodType, _>` iterates the same way a sorted list of code
/// strings would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BloodType {
    APos,
    ANeg,
    ABPos,
    ABNeg,
    BPos,
    BNeg,
    OPos,
    ONeg,
}

impl BloodType {
    /// All codes, in code order.
    pub const ALL: [BloodType; 8] = [
        BloodType::APos,
        BloodType::ANeg,
        BloodType::ABPos,
        BloodType::ABNeg,
        BloodType::BPos,
        BloodType::BNeg,
        BloodType::OPos,
        BloodType::ONeg,
    ];

    /// The canonical code, e.g. `"AB-"`.
    pub fn code(self) -> &'static str {
        match self {
            BloodType::APos => "A+",
            BloodType::ANeg => "A-",
            BloodType::ABPos => "AB+",
            BloodType::ABNeg => "AB-",
            BloodType::BPos => "B+",
            BloodType::BNeg => "B-",
            BloodType::OPos => "O+",
            BloodType::ONeg => "O-",
        }
    }

    /// Donor types a patient of this type can receive from.
    pub fn compatible_donors(self) -> &'static [BloodType] {
        use BloodType::*;
        match self {
            ONeg => &[ONeg],
            OPos => &[ONeg, OPos],
            ANeg => &[ONeg, ANeg],
            APos => &[ONeg, OPos, ANeg, APos],
            BNeg => &[ONeg, BNeg],
            BPos => &[ONeg, OPos, BNeg, BPos],
            ABNeg => &[ONeg, ANeg, BNeg, ABNeg],
            ABPos => &Self::ALL,
        }
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BloodType {
    type Err = ValidationError;

    /// Parse an exact code. Surrounding whitespace is ignored; case is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        BloodType::ALL
            .into_iter()
            .find(|bt| bt.code() == trimmed)
            .ok_or_else(|| ValidationError::UnknownBloodType(trimmed.to_string()))
    }
}

impl Serialize for BloodType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for BloodType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_codes() {
        for bt in BloodType::ALL {
            assert_eq!(bt.code().parse::<BloodType>().unwrap(), bt);
        }
        assert_eq!(" O- ".parse::<BloodType>().unwrap(), BloodType::ONeg);
    }

    #[test]
    fn test_parse_rejects_unknown_and_lowercase() {
        assert_eq!(
            "XX".parse::<BloodType>(),
            Err(ValidationError::UnknownBloodType("XX".to_string()))
        );
        assert!("ab+".parse::<BloodType>().is_err());
        assert!("".parse::<BloodType>().is_err());
    }

    #[test]
    fn test_order_matches_sorted_codes() {
        let mut codes: Vec<&str> = BloodType::ALL.iter().map(|bt| bt.code()).collect();
        let ordered = codes.clone();
        codes.sort();
        assert_eq!(codes, ordered);
    }

    #[test]
    fn test_compatibility_table() {
        assert_eq!(BloodType::ONeg.compatible_donors(), &[BloodType::ONeg]);
        assert_eq!(BloodType::ABPos.compatible_donors().len(), 8);
        assert!(BloodType::APos.compatible_donors().contains(&BloodType::OPos));
        assert!(!BloodType::APos.compatible_donors().contains(&BloodType::BNeg));
        assert!(BloodType::ABNeg.compatible_donors().contains(&BloodType::BNeg));
        assert!(!BloodType::ABNeg.compatible_donors().contains(&BloodType::ABPos));

        // O- donates to everyone.
        for bt in BloodType::ALL {
            assert!(bt.compatible_donors().contains(&BloodType::ONeg));
        }
    }

    #[test]
    fn test_serde_as_code_string() {
        let json = serde_json::to_string(&BloodType::ABNeg).unwrap();
        assert_eq!(json, "\"AB-\"");
        let parsed: BloodType = serde_json::from_str("\"B+\"").unwrap();
        assert_eq!(parsed, BloodType::BPos);
        assert!(serde_json::from_str::<BloodType>("\"Z\"").is_err());
    }
}
