// Flag diacritics: symbols of the form @OP.FEATURE.VALUE@ that constrain
// which paths may be combined during traversal.

use crate::DictionaryError;
use hashbrown::HashMap;

/// The five flag diacritic operations supported by VFST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOp {
    /// Positive set: unconditionally set the feature.
    P,
    /// Clear: reset the feature to neutral.
    C,
    /// Unification: set if neutral, pass if equal, fail otherwise.
    U,
    /// Require: fail unless the feature has the value (or any value for `@`).
    R,
    /// Disallow: fail if the feature has the value (or any value for `@`).
    D,
}

impl FlagOp {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'P' => Some(Self::P),
            b'C' => Some(Self::C),
            b'U' => Some(Self::U),
            b'R' => Some(Self::R),
            b'D' => Some(Self::D),
            _ => None,
        }
    }
}

/// Neutral value: the feature has not been set.
pub const FLAG_VALUE_NEUTRAL: u16 = 0;

/// Wildcard value written as `@` or as a missing value.
pub const FLAG_VALUE_ANY: u16 = 1;

/// A parsed flag diacritic with interned feature and value indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDiacritic {
    pub op: FlagOp,
    pub feature: u16,
    pub value: u16,
}

impl FlagDiacritic {
    /// Check the diacritic against the current value of its feature.
    ///
    /// Returns the value the feature holds after the transition, or `None`
    /// when the transition is blocked. Operations that only test the state
    /// return the current value unchanged.
    pub fn apply(&self, current: u16) -> Option<u16> {
        match self.op {
            FlagOp::P => Some(self.value),
            FlagOp::C => Some(FLAG_VALUE_NEUTRAL),
            FlagOp::U => {
                if current == FLAG_VALUE_NEUTRAL {
                    Some(self.value)
                } else if current == self.value {
                    Some(current)
                } else {
                    None
                }
            }
            FlagOp::R => {
                let ok = if self.value == FLAG_VALUE_ANY {
                    current != FLAG_VALUE_NEUTRAL
                } else {
                    current == self.value
                };
                ok.then_some(current)
            }
            FlagOp::D => {
                let blocked = (self.value == FLAG_VALUE_ANY && current != FLAG_VALUE_NEUTRAL)
                    || current == self.value;
                (!blocked).then_some(current)
            }
        }
    }
}

/// Interns feature and value names while a symbol table is being read.
pub struct FlagDiacriticParser {
    features: HashMap<String, u16>,
    values: HashMap<String, u16>,
}

impl Default for FlagDiacriticParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FlagDiacriticParser {
    pub fn new() -> Self {
        let mut values = HashMap::new();
        values.insert(String::new(), FLAG_VALUE_NEUTRAL);
        values.insert("@".to_string(), FLAG_VALUE_ANY);
        Self {
            features: HashMap::new(),
            values,
        }
    }

    /// Number of distinct features seen so far.
    pub fn feature_count(&self) -> u16 {
        self.features.len() as u16
    }

    /// Parse `@OP.FEATURE.VALUE@` or `@OP.FEATURE@`.
    ///
    /// A missing value means [`FLAG_VALUE_ANY`]. Features and values get
    /// sequential indices in order of first appearance.
    pub fn parse(&mut self, symbol: &str) -> Result<FlagDiacritic, DictionaryError> {
        let bytes = symbol.as_bytes();
        if bytes.len() <= 4 || bytes[2] != b'.' || !symbol.ends_with('@') {
            return Err(DictionaryError::InvalidFlagDiacritic(format!(
                "malformed: {symbol:?}"
            )));
        }

        let op = FlagOp::from_byte(bytes[1]).ok_or_else(|| {
            DictionaryError::InvalidFlagDiacritic(format!(
                "unknown operation '{}' in {symbol:?}",
                bytes[1] as char
            ))
        })?;

        let inner = &symbol[3..symbol.len() - 1];
        let (feature_name, value_name) = inner.split_once('.').unwrap_or((inner, "@"));

        let next_feature = self.features.len() as u16;
        let feature = *self
            .features
            .entry(feature_name.to_string())
            .or_insert(next_feature);

        let next_value = self.values.len() as u16;
        let value = *self
            .values
            .entry(value_name.to_string())
            .or_insert(next_value);

        Ok(FlagDiacritic { op, feature, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(op: FlagOp, value: u16) -> FlagDiacritic {
        FlagDiacritic {
            op,
            feature: 0,
            value,
        }
    }

    #[test]
    fn positive_set_overwrites() {
        assert_eq!(flag(FlagOp::P, 5).apply(FLAG_VALUE_NEUTRAL), Some(5));
        assert_eq!(flag(FlagOp::P, 5).apply(3), Some(5));
    }

    #[test]
    fn clear_resets_to_neutral() {
        assert_eq!(flag(FlagOp::C, 99).apply(5), Some(FLAG_VALUE_NEUTRAL));
    }

    #[test]
    fn unification() {
        let u = flag(FlagOp::U, 3);
        assert_eq!(u.apply(FLAG_VALUE_NEUTRAL), Some(3));
        assert_eq!(u.apply(3), Some(3));
        assert_eq!(u.apply(5), None);
    }

    #[test]
    fn require_any_and_specific() {
        let any = flag(FlagOp::R, FLAG_VALUE_ANY);
        assert_eq!(any.apply(3), Some(3));
        assert_eq!(any.apply(FLAG_VALUE_NEUTRAL), None);

        let five = flag(FlagOp::R, 5);
        assert_eq!(five.apply(5), Some(5));
        assert_eq!(five.apply(3), None);
    }

    #[test]
    fn disallow_any_and_specific() {
        let any = flag(FlagOp::D, FLAG_VALUE_ANY);
        assert_eq!(any.apply(FLAG_VALUE_NEUTRAL), Some(FLAG_VALUE_NEUTRAL));
        assert_eq!(any.apply(3), None);

        let five = flag(FlagOp::D, 5);
        assert_eq!(five.apply(5), None);
        assert_eq!(five.apply(3), Some(3));
        assert_eq!(five.apply(FLAG_VALUE_NEUTRAL), Some(FLAG_VALUE_NEUTRAL));
    }

    #[test]
    fn parse_with_and_without_value() {
        let mut parser = FlagDiacriticParser::new();
        let p = parser.parse("@P.CASE.NOM@").unwrap();
        assert_eq!(p.op, FlagOp::P);
        assert_eq!(p.feature, 0);
        assert_eq!(p.value, 2);

        let c = parser.parse("@C.CASE@").unwrap();
        assert_eq!(c.op, FlagOp::C);
        assert_eq!(c.feature, 0);
        assert_eq!(c.value, FLAG_VALUE_ANY);
    }

    #[test]
    fn indices_are_interned() {
        let mut parser = FlagDiacriticParser::new();
        let a = parser.parse("@P.CASE.NOM@").unwrap();
        let b = parser.parse("@P.NUM.SG@").unwrap();
        let c = parser.parse("@R.CASE.NOM@").unwrap();
        assert_eq!((a.feature, b.feature, c.feature), (0, 1, 0));
        assert_eq!(a.value, c.value);
        assert_ne!(a.value, b.value);
        assert_eq!(parser.feature_count(), 2);
    }

    #[test]
    fn reject_malformed() {
        let mut parser = FlagDiacriticParser::new();
        assert!(matches!(
            parser.parse("@P@"),
            Err(DictionaryError::InvalidFlagDiacritic(_))
        ));
        assert!(matches!(
            parser.parse("@X.FOO@"),
            Err(DictionaryError::InvalidFlagDiacritic(_))
        ));
        assert!(matches!(
            parser.parse("@PFOO.X@"),
            Err(DictionaryError::InvalidFlagDiacritic(_))
        ));
    }
}
