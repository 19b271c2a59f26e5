//! TruthValue - the three-valued domain used by every oracle

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// A truth value in strong Kleene logic.
///
/// `Undefined` stands for "not yet decided by the host". The connectives
/// only return a known value when the known operands alone determine it.
///
/// # Examples
///
/// ```
/// use oracleforge_core::TruthValue;
///
/// assert_eq!(TruthValue::True.or(TruthValue::Undefined), TruthValue::True);
/// assert_eq!(TruthValue::False.or(TruthValue::Undefined), TruthValue::Undefined);
/// assert_eq!(TruthValue::False.and(TruthValue::Undefined), TruthValue::False);
/// assert_eq!(!TruthValue::Undefined, TruthValue::Undefined);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TruthValue {
    /// Known to be false.
    False,
    /// Not yet assigned.
    #[default]
    Undefined,
    /// Known to be true.
    True,
}

impl TruthValue {
    /// Lifts a classical truth value.
    #[inline]
    pub const fn from_bool(value: bool) -> Self {
        if value {
            TruthValue::True
        } else {
            TruthValue::False
        }
    }

    /// Returns the classical value, or `None` if undefined.
    #[inline]
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            TruthValue::True => Some(true),
            TruthValue::False => Some(false),
            TruthValue::Undefined => None,
        }
    }

    #[inline]
    pub const fn is_true(self) -> bool {
        matches!(self, TruthValue::True)
    }

    #[inline]
    pub const fn is_false(self) -> bool {
        matches!(self, TruthValue::False)
    }

    #[inline]
    pub const fn is_undefined(self) -> bool {
        matches!(self, TruthValue::Undefined)
    }

    /// Returns true if the value is True or False.
    #[inline]
    pub const fn is_known(self) -> bool {
        !self.is_undefined()
    }

    /// Strong Kleene conjunction.
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (TruthValue::False, _) | (_, TruthValue::False) => TruthValue::False,
            (TruthValue::True, TruthValue::True) => TruthValue::True,
            _ => TruthValue::Undefined,
        }
    }

    /// Strong Kleene disjunction.
    pub const fn or(self, other: Self) -> Self {
        match (self, other) {
            (TruthValue::True, _) | (_, TruthValue::True) => TruthValue::True,
            (TruthValue::False, TruthValue::False) => TruthValue::False,
            _ => TruthValue::Undefined,
        }
    }

    /// Negation; Undefined stays Undefined.
    pub const fn negate(self) -> Self {
        match self {
            TruthValue::True => TruthValue::False,
            TruthValue::False => TruthValue::True,
            TruthValue::Undefined => TruthValue::Undefined,
        }
    }

    /// Conjunction over any number of operands. The empty conjunction is True.
    pub fn all<I>(values: I) -> Self
    where
        I: IntoIterator<Item = TruthValue>,
    {
        let mut acc = TruthValue::True;
        for value in values {
            acc = acc.and(value);
            if acc.is_false() {
                break;
            }
        }
        acc
    }

    /// Disjunction over any number of operands. The empty disjunction is False.
    pub fn any<I>(values: I) -> Self
    where
        I: IntoIterator<Item = TruthValue>,
    {
        let mut acc = TruthValue::False;
        for value in values {
            acc = acc.or(value);
            if acc.is_true() {
                break;
            }
        }
        acc
    }

    /// Knowledge order: `self` refines `other` if it agrees with every value
    /// `other` already knows.
    ///
    /// ```
    /// use oracleforge_core::TruthValue;
    ///
    /// assert!(TruthValue::True.refines(TruthValue::Undefined));
    /// assert!(!TruthValue::Undefined.refines(TruthValue::False));
    /// ```
    pub const fn refines(self, other: Self) -> bool {
        match other {
            TruthValue::Undefined => true,
            TruthValue::True => self.is_true(),
            TruthValue::False => self.is_false(),
        }
    }
}

impl From<bool> for TruthValue {
    fn from(value: bool) -> Self {
        TruthValue::from_bool(value)
    }
}

impl Not for TruthValue {
    type Output = TruthValue;

    fn not(self) -> TruthValue {
        self.negate()
    }
}

impl BitAnd for TruthValue {
    type Output = TruthValue;

    fn bitand(self, rhs: TruthValue) -> TruthValue {
        self.and(rhs)
    }
}

impl BitOr for TruthValue {
    type Output = TruthValue;

    fn bitor(self, rhs: TruthValue) -> TruthValue {
        self.or(rhs)
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TruthValue::True => "true",
            TruthValue::False => "false",
            TruthValue::Undefined => "undefined",
        };
        write!(f, "{s}")
    }
}
