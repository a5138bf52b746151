//! Per-token familiarity levels

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when an integer outside `0..=3` is offered as a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid knowledge level {0}, expected 0-3")]
pub struct LevelError(pub i64);

/// How well the learner knows a token.
///
/// Serialized as its integer value so the persisted mapping stays
/// readable (`{"hola": 3}`). `Neutral` renders exactly like a token that
/// was never rated, but it is still a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum KnowledgeLevel {
    Neutral = 0,
    NotKnown = 1,
    SemiKnown = 2,
    Known = 3,
}

impl KnowledgeLevel {
    /// Map a digit key (`'0'`..=`'3'`) to a level
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::try_from(i64::from(d)).ok())
    }

    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for KnowledgeLevel {
    type Error = LevelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Neutral),
            1 => Ok(Self::NotKnown),
            2 => Ok(Self::SemiKnown),
            3 => Ok(Self::Known),
            other => Err(LevelError(other)),
        }
    }
}

impl From<KnowledgeLevel> for i64 {
    fn from(level: KnowledgeLevel) -> Self {
        level.as_i64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_levels() {
        assert_eq!(KnowledgeLevel::from_digit('0'), Some(KnowledgeLevel::Neutral));
        assert_eq!(KnowledgeLevel::from_digit('3'), Some(KnowledgeLevel::Known));
        assert_eq!(KnowledgeLevel::from_digit('4'), None);
        assert_eq!(KnowledgeLevel::from_digit('x'), None);
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(KnowledgeLevel::try_from(7), Err(LevelError(7)));
        assert_eq!(KnowledgeLevel::try_from(-1), Err(LevelError(-1)));
    }

    #[test]
    fn serializes_as_integer() {
        let json = serde_json::to_string(&KnowledgeLevel::SemiKnown).unwrap();
        assert_eq!(json, "2");
        let level: KnowledgeLevel = serde_json::from_str("1").unwrap();
        assert_eq!(level, KnowledgeLevel::NotKnown);
        assert!(serde_json::from_str::<KnowledgeLevel>("9").is_err());
    }
}
