use std::str::FromStr;

use common::{AppError, Result};

/// A validated cap on how many raw items to take from the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(usize);

impl Limit {
    pub fn new(max: i64) -> Result<Self> {
        usize::try_from(max)
            .map(Self)
            .map_err(|_| AppError::invalid_config(format!("max must be non-negative, got {max}")))
    }

    /// Parses an optional command-line value; `None` means no cap.
    pub fn parse_opt(value: Option<&str>) -> Result<Option<Self>> {
        value.map(str::parse).transpose()
    }

    /// Returns the leading `max` items, or all of them when uncapped.
    pub fn cap<T>(max: Option<Self>, items: &[T]) -> &[T] {
        match max {
            Some(limit) => &items[..limit.0.min(items.len())],
            None => items,
        }
    }

    pub fn reached(max: Option<Self>, count: usize) -> bool {
        max.is_some_and(|limit| count >= limit.0)
    }
}

impl FromStr for Limit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let parsed = s
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::invalid_config(format!("max must be an integer, got {s:?}")))?;
        Self::new(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative() {
        let err = Limit::new(-1).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn rejects_non_integer() {
        assert!("2.5".parse::<Limit>().is_err());
        assert!("ten".parse::<Limit>().is_err());
        assert_eq!("20".parse::<Limit>().unwrap(), Limit(20));
    }

    #[test]
    fn parse_opt_passes_through_none() {
        assert_eq!(Limit::parse_opt(None).unwrap(), None);
        assert_eq!(Limit::parse_opt(Some("0")).unwrap(), Some(Limit(0)));
    }

    #[test]
    fn cap_never_overruns() {
        let items = [1, 2, 3];
        assert_eq!(Limit::cap(Some(Limit(2)), &items), &[1, 2]);
        assert_eq!(Limit::cap(Some(Limit(10)), &items), &[1, 2, 3]);
        assert_eq!(Limit::cap(None, &items), &[1, 2, 3]);
        assert!(Limit::reached(Some(Limit(3)), 3));
        assert!(!Limit::reached(None, 3));
    }
}
