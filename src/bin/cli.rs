//! CLI tool for card validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate with the live chain
//! card-validator validate 4111111111111111 --exp-month 01 --exp-year 2028
//!
//! # Validate with the test chain, JSON output
//! card-validator validate 4242424242424242 -m 01 -y 2028 --mode test --output json
//!
//! # Validate a JSON array of {number, expMonth, expYear} records
//! card-validator batch cards.json
//!
//! # Luhn helpers
//! card-validator luhn 4111111111111111
//! card-validator check-digit 411111111111111
//! ```

use std::io::Read;
use std::process::ExitCode;

use card_validator::{
    luhn, mask, BatchValidator, Brand, CardRecord, ValidationService, ValidatorType, Verdict,
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "card-validator")]
#[command(author, version, about = "Card validation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a card against the live or test chain
    Validate {
        /// Card number, digits only
        number: String,

        /// Expiration month (MM)
        #[arg(short = 'm', long, default_value = "")]
        exp_month: String,

        /// Expiration year (YYYY)
        #[arg(short = 'y', long, default_value = "")]
        exp_year: String,

        /// Which chain to run
        #[arg(long, value_enum, default_value_t = ValidatorType::Live)]
        mode: ValidatorType,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Validate a JSON array of card records ("-" reads stdin)
    Batch {
        /// Path to the JSON file
        path: String,

        /// Which chain to run
        #[arg(long, value_enum, default_value_t = ValidatorType::Live)]
        mode: ValidatorType,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Check if a number passes the Luhn algorithm
    Luhn {
        /// Card number to check
        number: String,
    },

    /// Compute the Luhn check digit for a partial number
    CheckDigit {
        /// Digits without the check digit
        partial: String,
    },

    /// Mask a card number, keeping the last four characters
    Mask {
        /// Card number to mask
        number: String,
    },

    /// Show the brand inferred from the leading digit
    Detect {
        /// Card number (or prefix)
        number: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            number,
            exp_month,
            exp_year,
            mode,
            output,
        } => cmd_validate(CardRecord::new(number, exp_month, exp_year), mode, output),
        Commands::Batch { path, mode, output } => cmd_batch(&path, mode, output),
        Commands::Luhn { number } => cmd_luhn(&number),
        Commands::CheckDigit { partial } => cmd_check_digit(&partial),
        Commands::Mask { number } => {
            println!("{}", mask::mask_number(&number));
            ExitCode::SUCCESS
        }
        Commands::Detect { number } => cmd_detect(&number),
    }
}

fn cmd_validate(card: CardRecord, kind: ValidatorType, output: OutputFormat) -> ExitCode {
    let service = ValidationService::new();

    let verdict = match service.validate_card(&card, kind) {
        Ok(verdict) => verdict,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match output {
        OutputFormat::Text => {
            println!("Card: {}", card);
            print_verdict_text(&verdict);
        }
        OutputFormat::Json => print_json(&verdict),
    }

    if verdict.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_batch(path: &str, kind: ValidatorType, output: OutputFormat) -> ExitCode {
    let input = match read_input(path) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let cards: Vec<CardRecord> = match serde_json::from_str(&input) {
        Ok(cards) => cards,
        Err(e) => {
            eprintln!("Error: invalid JSON: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let service = ValidationService::new();
    let Some(chain) = service.factory().resolve(kind) else {
        eprintln!("Error: unknown validator type: {}", kind);
        return ExitCode::FAILURE;
    };

    let verdicts = BatchValidator::new(chain).validate_all(&cards);
    let valid = verdicts.iter().filter(|v| v.is_valid()).count();

    match output {
        OutputFormat::Text => {
            for (card, verdict) in cards.iter().zip(&verdicts) {
                if verdict.is_valid() {
                    println!("{}: valid", card.masked());
                } else {
                    println!("{}: invalid - {}", card.masked(), verdict.reason());
                }
            }
            println!("Total: {}, Valid: {}, Invalid: {}", cards.len(), valid, cards.len() - valid);
        }
        OutputFormat::Json => print_json(&verdicts),
    }

    if valid == cards.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_luhn(number: &str) -> ExitCode {
    if luhn::passes_luhn(number) {
        println!("Luhn check: PASS");
        ExitCode::SUCCESS
    } else {
        println!("Luhn check: FAIL");
        ExitCode::FAILURE
    }
}

fn cmd_check_digit(partial: &str) -> ExitCode {
    match luhn::check_digit(partial) {
        Some(digit) => {
            println!("Check digit: {}", digit);
            println!("Full number: {}{}", partial, digit);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("Error: {}", luhn::INVALID_DIGIT);
            ExitCode::FAILURE
        }
    }
}

fn cmd_detect(number: &str) -> ExitCode {
    let brand = Brand::detect(number);
    println!("Detected Brand: {}", brand.name());
    match brand.valid_lengths() {
        Some(lengths) => println!("Valid Lengths: {:?}", lengths),
        None => println!("Valid Lengths: not checked"),
    }
    ExitCode::SUCCESS
}

fn print_verdict_text(verdict: &Verdict) {
    if verdict.is_valid() {
        println!("Valid: yes");
    } else {
        println!("Valid: no");
        println!("Reason: {}", verdict.reason());
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn read_input(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(input)
    } else {
        std::fs::read_to_string(path)
    }
}
