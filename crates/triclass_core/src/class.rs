use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of classes the classifier distinguishes.
pub const CLASS_COUNT: usize = 3;

/// One of the three class labels. Stored 0-based, displayed 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ClassId(u8);

impl ClassId {
    pub const ALL: [ClassId; CLASS_COUNT] = [ClassId(0), ClassId(1), ClassId(2)];

    pub fn new(index: usize) -> Result<Self> {
        if index < CLASS_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(Error::InvalidClass(index))
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Human-facing number, starting at 1.
    pub fn number(self) -> usize {
        self.index() + 1
    }
}

impl TryFrom<usize> for ClassId {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Self::new(index)
    }
}

impl From<ClassId> for usize {
    fn from(class: ClassId) -> usize {
        class.index()
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_index() {
        assert!(matches!(ClassId::new(3), Err(Error::InvalidClass(3))));
        assert_eq!(ClassId::new(2).unwrap().index(), 2);
    }

    #[test]
    fn displays_one_based() {
        assert_eq!(ClassId::ALL[0].to_string(), "class 1");
        assert_eq!(ClassId::ALL[2].number(), 3);
    }
}
