//! Logical pointer buttons and the held-button bitmask.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// One of the five logical buttons a host pointer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Button {
    Left = 0,
    Right = 1,
    Middle = 2,
    Back = 3,
    Forward = 4,
}

impl Button {
    /// Scan order used when resolving transitions.
    pub const ALL: [Button; 5] = [
        Button::Left,
        Button::Right,
        Button::Middle,
        Button::Back,
        Button::Forward,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl TryFrom<u8> for Button {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Button::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| Error::InvalidButton(index.to_string()))
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Button::Left => write!(f, "left"),
            Button::Right => write!(f, "right"),
            Button::Middle => write!(f, "middle"),
            Button::Back => write!(f, "back"),
            Button::Forward => write!(f, "forward"),
        }
    }
}

impl FromStr for Button {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Button::Left),
            "right" => Ok(Button::Right),
            "middle" => Ok(Button::Middle),
            "back" | "backward" => Ok(Button::Back),
            "forward" => Ok(Button::Forward),
            _ => Err(Error::InvalidButton(s.to_string())),
        }
    }
}

/// Bitmask of held buttons; bit `i` is `Button::ALL[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: ButtonSet = ButtonSet(0);

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn remove(&mut self, button: Button) {
        self.0 &= !button.bit();
    }

    pub fn contains(self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.contains(*b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_index() {
        assert_eq!(Button::try_from(0).unwrap(), Button::Left);
        assert_eq!(Button::try_from(4).unwrap(), Button::Forward);
        assert!(matches!(Button::try_from(5), Err(Error::InvalidButton(_))));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Middle".parse::<Button>().unwrap(), Button::Middle);
        assert_eq!("backward".parse::<Button>().unwrap(), Button::Back);
        assert!("wheel".parse::<Button>().is_err());
    }

    #[test]
    fn test_button_set() {
        let mut set = ButtonSet::EMPTY;
        set.insert(Button::Right);
        set.insert(Button::Forward);
        assert_eq!(set.bits(), 0b10010);
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Button::Right, Button::Forward]);

        set.remove(Button::Right);
        set.remove(Button::Left);
        assert!(set.contains(Button::Forward));
        assert!(!set.contains(Button::Right));

        set.remove(Button::Forward);
        assert!(set.is_empty());
    }
}
