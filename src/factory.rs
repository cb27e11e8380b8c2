//! Validator selection.
//!
//! [`ValidatorFactory`] maps a [`ValidatorType`] to a chain built once at
//! construction. The mapping is fixed; there is no runtime registration.

use std::fmt;
use std::str::FromStr;

use crate::chain::RuleChain;
use crate::error::ParseValidatorTypeError;
use crate::expiry::{Clock, SystemClock};

/// Which pre-built chain to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ValidatorType {
    /// Full rule chain for real cards.
    Live,
    /// Sentinel-number chain for integration testing.
    Test,
}

impl ValidatorType {
    /// All validator types.
    pub const ALL: [ValidatorType; 2] = [ValidatorType::Live, ValidatorType::Test];

    /// Lowercase name, as accepted by [`FromStr`].
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Test => "test",
        }
    }

    #[inline]
    const fn index(self) -> usize {
        match self {
            Self::Live => 0,
            Self::Test => 1,
        }
    }
}

impl fmt::Display for ValidatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidatorType {
    type Err = ParseValidatorTypeError;

    /// Parses `live` or `test`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("live") {
            Ok(Self::Live)
        } else if s.eq_ignore_ascii_case("test") {
            Ok(Self::Test)
        } else {
            Err(ParseValidatorTypeError {
                input: s.to_string(),
            })
        }
    }
}

/// Lookup table from validator type to chain.
#[derive(Debug)]
pub struct ValidatorFactory {
    chains: [Option<RuleChain>; 2],
}

impl ValidatorFactory {
    /// Factory with the live and test chains, reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Factory with the live and test chains sharing one clock.
    pub fn with_clock<C: Clock + Clone + 'static>(clock: C) -> Self {
        Self::empty()
            .with_chain(ValidatorType::Live, RuleChain::live_with_clock(clock.clone()))
            .with_chain(ValidatorType::Test, RuleChain::test_with_clock(clock))
    }

    /// Factory with no chains; every lookup misses.
    pub fn empty() -> Self {
        Self {
            chains: [None, None],
        }
    }

    /// Installs `chain` for `kind`, replacing any previous one.
    #[must_use]
    pub fn with_chain(mut self, kind: ValidatorType, chain: RuleChain) -> Self {
        self.chains[kind.index()] = Some(chain);
        self
    }

    /// Returns the chain for `kind`, if one is installed.
    #[inline]
    pub fn resolve(&self, kind: ValidatorType) -> Option<&RuleChain> {
        self.chains[kind.index()].as_ref()
    }

    /// Resolves a textual validator type. Unknown names yield `None`.
    pub fn resolve_name(&self, name: &str) -> Option<&RuleChain> {
        name.parse::<ValidatorType>()
            .ok()
            .and_then(|kind| self.resolve(kind))
    }
}

impl Default for ValidatorFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_both_chains() {
        let factory = ValidatorFactory::new();
        assert_eq!(
            factory.resolve(ValidatorType::Live).unwrap().rule_names(),
            vec!["luhn", "brand_length", "expiration"]
        );
        assert_eq!(
            factory.resolve(ValidatorType::Test).unwrap().rule_names(),
            vec!["test_card"]
        );
    }

    #[test]
    fn test_empty_factory_misses() {
        let factory = ValidatorFactory::empty();
        for kind in ValidatorType::ALL {
            assert!(factory.resolve(kind).is_none());
        }
    }

    #[test]
    fn test_with_chain_replaces() {
        let factory = ValidatorFactory::new().with_chain(ValidatorType::Live, RuleChain::new());
        assert!(factory.resolve(ValidatorType::Live).unwrap().is_empty());
        assert!(!factory.resolve(ValidatorType::Test).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_name() {
        let factory = ValidatorFactory::new();
        assert!(factory.resolve_name("live").is_some());
        assert!(factory.resolve_name("TEST").is_some());
        assert!(factory.resolve_name("sandbox").is_none());
        assert!(factory.resolve_name("").is_none());
    }

    #[test]
    fn test_parse_validator_type() {
        assert_eq!("live".parse::<ValidatorType>(), Ok(ValidatorType::Live));
        assert_eq!("Test".parse::<ValidatorType>(), Ok(ValidatorType::Test));
        let err = "prod".parse::<ValidatorType>().unwrap_err();
        assert_eq!(err.input, "prod");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_value_enum_names_match_as_str() {
        use clap::ValueEnum;

        for kind in ValidatorType::ALL {
            let value = kind.to_possible_value().unwrap();
            assert_eq!(value.get_name(), kind.as_str());
            assert_eq!(<ValidatorType as ValueEnum>::from_str(kind.as_str(), false), Ok(kind));
        }
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for kind in ValidatorType::ALL {
            assert_eq!(kind.to_string().parse::<ValidatorType>(), Ok(kind));
        }
    }
}
