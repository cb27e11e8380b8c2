//! # card_validator
//!
//! Card validation built from small, composable rules.
//!
//! ## Features
//!
//! - Luhn checksum, brand-length and expiration rules
//! - Ordered, fail-fast rule chains that nest
//! - Live and test validators selected by [`ValidatorType`]
//! - Injectable clock for deterministic expiry checks
//! - Masked `Debug`/`Display` for card records
//! - Multiple interfaces: library, CLI, REST API
//!
//! ## Quick Start
//!
//! ```rust
//! use card_validator::{CardRecord, ValidationService, ValidatorType};
//!
//! let service = ValidationService::new();
//!
//! let card = CardRecord::new("4111111111111111", "12", "2099");
//! let verdict = service.validate_card(&card, ValidatorType::Live).unwrap();
//! assert!(verdict.is_valid());
//! assert_eq!(verdict.reason(), "");
//!
//! // Only the first failing rule is reported
//! let card = CardRecord::new("424242424242424", "12", "2099");
//! let verdict = service.validate_card(&card, ValidatorType::Live).unwrap();
//! assert_eq!(verdict.reason(), "Invalid card number length. Must be 13 or 16");
//!
//! // Safe for logging - never exposes the full number
//! println!("Card: {}", card); // "***********2424 12/2099"
//! ```
//!
//! ## Test Validator
//!
//! ```rust
//! use card_validator::{CardRecord, ValidationService, ValidatorType};
//!
//! let service = ValidationService::new();
//!
//! let card = CardRecord::new("4242424242424242", "12", "2099");
//! assert!(service.validate_card(&card, ValidatorType::Test).unwrap().is_valid());
//!
//! let card = CardRecord::new("4111111111111111", "12", "2099");
//! let verdict = service.validate_card(&card, ValidatorType::Test).unwrap();
//! assert_eq!(verdict.reason(), "Invalid card number. Must be 4242424242424242");
//! ```
//!
//! ## Custom Chains
//!
//! ```rust
//! use card_validator::{CardRecord, LuhnRule, Rule, RuleChain};
//!
//! let chain = RuleChain::new().with(LuhnRule::new());
//! assert!(chain.evaluate(&CardRecord::with_number("4111111111111111")).is_ok());
//!
//! let rejection = chain.evaluate(&CardRecord::with_number("4111 1111")).unwrap_err();
//! assert_eq!(rejection.reason(), "invalid digit");
//! ```
//!
//! ## Rules
//!
//! | Rule | Checks | Reason on failure |
//! |------|--------|-------------------|
//! | `luhn` | digits only, modulus-10 sum | `invalid digit` / `Invalid card number` |
//! | `brand_length` | 4 → 13 or 16 digits, 5 → 16 digits | `Invalid card number length. Must be ...` |
//! | `expiration` | `MM` 01-12, `YYYY`, before next month | `Invalid expiration month` / `year` / `date` |
//! | `test_card` | number is 4242424242424242, then expiration | `Invalid card number. Must be 4242424242424242` |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Deserialize records, serialize verdicts |
//! | `parallel` | Rayon-based batch validation |
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod batch;
pub mod brand;
pub mod card;
pub mod chain;
#[cfg(feature = "server")]
pub mod config;
pub mod error;
pub mod expiry;
pub mod factory;
#[cfg(feature = "server")]
pub mod http;
pub mod luhn;
pub mod mask;
pub mod rule;
pub mod service;

// Re-export main types at crate root
pub use batch::BatchValidator;
pub use brand::{Brand, BrandLengthRule};
pub use card::CardRecord;
pub use chain::{RuleChain, TestCardRule, TEST_CARD_NUMBER};
pub use error::{ParseValidatorTypeError, ServiceError};
pub use expiry::{Clock, ExpirationRule, FixedClock, SystemClock};
pub use factory::{ValidatorFactory, ValidatorType};
pub use luhn::{passes_luhn, LuhnRule};
pub use rule::{Rejection, Rule, RuleResult};
pub use service::{ValidationService, Verdict};
