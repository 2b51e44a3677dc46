use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid time value")]
pub struct InvalidTime(pub i64);

/// Minute of the day, `0..=1439`.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, PartialOrd, Hash, Deserialize)]
#[serde(try_from = "i64")]
pub struct Minute(u16);

impl Minute {
    pub const MIN: Minute = Minute(0);
    pub const MAX: Minute = Minute(24 * 60 - 1);

    pub fn new(value: u16) -> Option<Minute> {
        (value <= Self::MAX.0).then_some(Minute(value))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Minutes from `self` until `later`, `None` if `later` is earlier.
    pub fn until(self, later: Minute) -> Option<u16> {
        later.0.checked_sub(self.0)
    }

    pub fn clock(self) -> String {
        format!("{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<i64> for Minute {
    type Error = InvalidTime;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .and_then(Minute::new)
            .ok_or(InvalidTime(value))
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(Minute::try_from(0), Ok(Minute::MIN));
        assert_eq!(Minute::try_from(1439), Ok(Minute::MAX));
        assert_eq!(Minute::try_from(1440), Err(InvalidTime(1440)));
        assert_eq!(Minute::try_from(-1), Err(InvalidTime(-1)));
        assert_eq!(Minute::try_from(i64::MAX), Err(InvalidTime(i64::MAX)));
    }

    #[test]
    fn test_until() {
        let early = Minute::new(100).unwrap();
        let late = Minute::new(250).unwrap();
        assert_eq!(early.until(late), Some(150));
        assert_eq!(late.until(early), None);
        assert_eq!(late.until(late), Some(0));
    }

    #[test]
    fn test_clock() {
        assert_eq!(Minute::new(360).unwrap().clock(), "06:00");
        assert_eq!(Minute::MAX.clock(), "23:59");
        assert_eq!(Minute::new(65).unwrap().to_string(), "65");
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        assert_eq!(
            serde_json::from_str::<Minute>("720").unwrap(),
            Minute::new(720).unwrap()
        );
        assert!(serde_json::from_str::<Minute>("1500").is_err());
        assert!(serde_json::from_str::<Minute>("-1").is_err());
    }
}
