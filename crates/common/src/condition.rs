//! Branch and call predicates, plus the condition code they are tested against.

use crate::error::DecodeError;

/// Predicate of a BRANCH or CALL, stored in the reg/cond field.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Unconditional.
    Nc = 0,
    /// Last result equal to zero.
    Eq = 1,
    /// Last result not zero.
    Ne = 2,
    /// Last result strictly positive.
    Gt = 3,
    /// Last result positive or zero.
    Ge = 4,
    /// Last result strictly negative.
    Lt = 5,
    /// Last result negative or zero.
    Le = 6,
}

/// All conditions in encoding order.
pub const ALL_CONDITIONS: [Condition; 7] = [
    Condition::Nc,
    Condition::Eq,
    Condition::Ne,
    Condition::Gt,
    Condition::Ge,
    Condition::Lt,
    Condition::Le,
];

impl Condition {
    /// Assembly name.
    pub fn name(self) -> &'static str {
        match self {
            Condition::Nc => "NC",
            Condition::Eq => "EQ",
            Condition::Ne => "NE",
            Condition::Gt => "GT",
            Condition::Ge => "GE",
            Condition::Lt => "LT",
            Condition::Le => "LE",
        }
    }
}

impl TryFrom<u8> for Condition {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ALL_CONDITIONS
            .get(value as usize)
            .copied()
            .ok_or(DecodeError::UnknownCondition(value))
    }
}

/// Sign of the last LOAD/ADD/SUB result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConditionCode {
    /// Power-on state; never reassigned once a result is computed.
    #[default]
    Undefined,
    /// Result was zero.
    Zero,
    /// Result was strictly positive.
    Positive,
    /// Result was strictly negative.
    Negative,
}

impl ConditionCode {
    /// Condition code describing `value`.
    pub fn from_result(value: i32) -> Self {
        match value.signum() {
            1 => ConditionCode::Positive,
            -1 => ConditionCode::Negative,
            _ => ConditionCode::Zero,
        }
    }

    /// One-letter form used in register dumps.
    pub fn letter(self) -> char {
        match self {
            ConditionCode::Undefined => 'U',
            ConditionCode::Zero => 'Z',
            ConditionCode::Positive => 'P',
            ConditionCode::Negative => 'N',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_bytes_roundtrip() {
        for &cond in &ALL_CONDITIONS {
            assert_eq!(Condition::try_from(cond as u8), Ok(cond));
        }
        assert_eq!(
            Condition::try_from(7),
            Err(DecodeError::UnknownCondition(7))
        );
        assert_eq!(
            Condition::try_from(31),
            Err(DecodeError::UnknownCondition(31))
        );
    }

    #[test]
    fn condition_code_from_result() {
        assert_eq!(ConditionCode::from_result(0), ConditionCode::Zero);
        assert_eq!(ConditionCode::from_result(15), ConditionCode::Positive);
        assert_eq!(ConditionCode::from_result(-5), ConditionCode::Negative);
        assert_eq!(ConditionCode::from_result(i32::MIN), ConditionCode::Negative);
        assert_eq!(ConditionCode::from_result(i32::MAX), ConditionCode::Positive);
    }

    #[test]
    fn condition_code_letters() {
        let letters: String = [
            ConditionCode::Undefined,
            ConditionCode::Zero,
            ConditionCode::Positive,
            ConditionCode::Negative,
        ]
        .iter()
        .map(|cc| cc.letter())
        .collect();
        assert_eq!(letters, "UZPN");
    }

    #[test]
    fn default_is_undefined() {
        assert_eq!(ConditionCode::default(), ConditionCode::Undefined);
    }
}
