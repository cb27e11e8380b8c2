//! The validation service façade.
//!
//! This is the entry point transport layers call: it resolves a chain for
//! the requested [`ValidatorType`], runs it, and wraps the outcome into a
//! [`Verdict`]. It performs no I/O.

use crate::card::CardRecord;
use crate::error::ServiceError;
use crate::expiry::Clock;
use crate::factory::{ValidatorFactory, ValidatorType};
use crate::rule::{Rule, RuleResult};

/// Reason used when a rule rejects without saying why.
const FALLBACK_REASON: &str = "validation failed";

/// Final validity result for one card.
///
/// `reason` is empty if and only if the card is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Verdict {
    #[cfg_attr(feature = "serde", serde(rename = "valid"))]
    is_valid: bool,
    reason: String,
}

impl Verdict {
    /// A passing verdict.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            reason: String::new(),
        }
    }

    /// A failing verdict. An empty reason is replaced by a generic one.
    pub fn invalid(reason: impl Into<String>) -> Self {
        let mut reason = reason.into();
        if reason.is_empty() {
            reason.push_str(FALLBACK_REASON);
        }
        Self {
            is_valid: false,
            reason,
        }
    }

    /// Whether every rule passed.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// The first failing rule's reason; empty when valid.
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<RuleResult> for Verdict {
    fn from(result: RuleResult) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(rejection) => Self::invalid(rejection.reason()),
        }
    }
}

/// Validates cards against the chain picked by a validator type.
#[derive(Debug, Default)]
pub struct ValidationService {
    factory: ValidatorFactory,
}

impl ValidationService {
    /// Service with the live and test chains, reading the system clock.
    pub fn new() -> Self {
        Self::with_factory(ValidatorFactory::new())
    }

    /// Service with the live and test chains sharing an injected clock.
    pub fn with_clock<C: Clock + Clone + 'static>(clock: C) -> Self {
        Self::with_factory(ValidatorFactory::with_clock(clock))
    }

    /// Service over an explicit factory.
    pub fn with_factory(factory: ValidatorFactory) -> Self {
        Self { factory }
    }

    /// Returns the factory backing this service.
    pub fn factory(&self) -> &ValidatorFactory {
        &self.factory
    }

    /// Validates `card` with the chain for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UnknownValidatorType`] when no chain is
    /// installed for `kind`. Card data problems are never errors; they come
    /// back as an invalid [`Verdict`].
    ///
    /// # Example
    ///
    /// ```
    /// use card_validator::{CardRecord, ValidationService, ValidatorType};
    ///
    /// let service = ValidationService::new();
    /// let card = CardRecord::new("4242424242424241", "01", "2099");
    ///
    /// let verdict = service.validate_card(&card, ValidatorType::Live).unwrap();
    /// assert!(!verdict.is_valid());
    /// assert_eq!(verdict.reason(), "Invalid card number");
    /// ```
    pub fn validate_card(
        &self,
        card: &CardRecord,
        kind: ValidatorType,
    ) -> Result<Verdict, ServiceError> {
        let chain = self
            .factory
            .resolve(kind)
            .ok_or_else(|| ServiceError::UnknownValidatorType(kind.to_string()))?;

        Ok(chain.evaluate(card).into())
    }

    /// Validates `card` with the chain named by `kind` (`live` or `test`).
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::UnknownValidatorType`] when the name is not
    /// recognised or has no chain.
    pub fn validate_card_named(
        &self,
        card: &CardRecord,
        kind: &str,
    ) -> Result<Verdict, ServiceError> {
        let kind: ValidatorType = kind.parse()?;
        self.validate_card(card, kind)
    }
}
