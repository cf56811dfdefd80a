//! # Validation Module
//!
//! Format predicates and form validators for TollPay.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Predicates (is_valid_*)                                      │
//! │  ├── Pure regex/character checks, one value at a time                  │
//! │  └── Return bool, never allocate an error                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Form validators (validate_*_form)                            │
//! │  ├── Run every predicate for one form                                  │
//! │  ├── Collect one message per failing field (FieldErrors)               │
//! │  └── Return normalized input on success                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Session stores                                               │
//! │  └── Trust their input; only state-dependent checks (no tag linked)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tollpay_core::validation::{validate_link_tag_form, is_valid_account_number};
//!
//! assert!(is_valid_account_number("123456789"));
//!
//! let input = validate_link_tag_form("1234567890123456", "mh01ab1234").unwrap();
//! assert_eq!(input.vehicle_number, "MH01AB1234");
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{FieldErrors, ValidationError};
use crate::money::Money;
use crate::types::AutoRechargeUpdate;

/// Result type for single-value validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Patterns
// =============================================================================

static ACCOUNT_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{9,18}$").expect("valid account number regex"));

static IFSC_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").expect("valid IFSC regex"));

static VEHICLE_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z]{1,2}[0-9]{4}$").expect("valid vehicle number regex")
});

static TAG_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{16}$").expect("valid tag id regex"));

/// Symbols accepted as the "special character" of a strong password.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;

// =============================================================================
// Predicates
// =============================================================================

/// Bank account number: 9 to 18 ASCII digits.
///
/// ```rust
/// use tollpay_core::validation::is_valid_account_number;
///
/// assert!(!is_valid_account_number("12345678"));          // 8 digits
/// assert!(is_valid_account_number("123456789012345678"));  // 18 digits
/// assert!(!is_valid_account_number("1234567890123456789")); // 19 digits
/// ```
pub fn is_valid_account_number(value: &str) -> bool {
    ACCOUNT_NUMBER_REGEX.is_match(value)
}

/// IFSC code: four letters, a literal `0`, six letters or digits.
///
/// Case-sensitive. Callers upper-case user input first.
///
/// ```rust
/// use tollpay_core::validation::is_valid_ifsc_code;
///
/// assert!(is_valid_ifsc_code("SBIN0123456"));
/// assert!(!is_valid_ifsc_code("SBIN1123456"));
/// assert!(!is_valid_ifsc_code("sbin0123456"));
/// ```
pub fn is_valid_ifsc_code(value: &str) -> bool {
    IFSC_CODE_REGEX.is_match(value)
}

/// Indian registration number such as `MH01AB1234` or `DL05C4321`.
///
/// The check is applied to the upper-cased input, so `mh01ab1234` passes.
pub fn is_valid_vehicle_number(value: &str) -> bool {
    VEHICLE_NUMBER_REGEX.is_match(&value.to_uppercase())
}

/// FASTag id: exactly 16 digits.
pub fn is_valid_tag_id(value: &str) -> bool {
    TAG_ID_REGEX.is_match(value)
}

/// Confirmation equality, kept apart from the strength rules.
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password == confirmation
}

// =============================================================================
// Password Strength
// =============================================================================

/// Which strength rules a password satisfies.
///
/// The registration page renders each flag as a checklist item, so the
/// rules are exposed individually rather than as one boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub has_min_length: bool,
    pub has_uppercase: bool,
    pub has_lowercase: bool,
    pub has_digit: bool,
    pub has_symbol: bool,
}

impl PasswordStrength {
    /// Evaluates every rule against `password`.
    ///
    /// ```rust
    /// use tollpay_core::validation::PasswordStrength;
    ///
    /// assert!(PasswordStrength::evaluate("Str0ng!pw").is_strong());
    /// assert!(!PasswordStrength::evaluate("weakpass").is_strong());
    /// ```
    pub fn evaluate(password: &str) -> Self {
        PasswordStrength {
            has_min_length: password.chars().count() >= PASSWORD_MIN_LENGTH,
            has_uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            has_digit: password.chars().any(|c| c.is_ascii_digit()),
            has_symbol: password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)),
        }
    }

    /// Conjunction of all rules.
    pub fn is_strong(&self) -> bool {
        self.has_min_length && self.has_uppercase && self.has_lowercase && self.has_digit && self.has_symbol
    }

    /// Human-readable names of the unmet rules, in checklist order.
    pub fn missing_rules(&self) -> Vec<String> {
        [
            (self.has_min_length, "at least 8 characters"),
            (self.has_uppercase, "an uppercase letter"),
            (self.has_lowercase, "a lowercase letter"),
            (self.has_digit, "a number"),
            (self.has_symbol, "a special character"),
        ]
        .into_iter()
        .filter(|(met, _)| !met)
        .map(|(_, rule)| rule.to_string())
        .collect()
    }
}

/// Validates password strength, reporting every unmet rule.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    let strength = PasswordStrength::evaluate(password);
    if strength.is_strong() {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword {
            missing: strength.missing_rules(),
        })
    }
}

// =============================================================================
// Amounts
// =============================================================================

/// Inclusive bounds and step for the settings page's threshold input.
pub const THRESHOLD_RANGE: (Money, Money) = (Money::from_rupees(100), Money::from_rupees(1000));

/// Inclusive bounds and step for the settings page's recharge amount input.
pub const RECHARGE_AMOUNT_RANGE: (Money, Money) = (Money::from_rupees(200), Money::from_rupees(5000));

/// Both settings inputs move in ₹100 steps.
pub const SETTINGS_STEP: Money = Money::from_rupees(100);

/// A manual top-up must add something.
pub fn validate_recharge_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }
    Ok(())
}

fn validate_stepped_amount(
    field: &str,
    amount: Money,
    (min, max): (Money, Money),
) -> ValidationResult<()> {
    if amount < min || amount > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }
    if amount.paise() % SETTINGS_STEP.paise() != 0 {
        return Err(ValidationError::NotMultipleOf {
            field: field.to_string(),
            step: SETTINGS_STEP,
        });
    }
    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

/// Normalized input of the link-tag form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTagInput {
    pub tag_id: String,
    /// Upper-cased.
    pub vehicle_number: String,
}

/// Validates the link-tag form.
///
/// ## Field Messages
/// - `tagId`: "Please enter a valid 16-digit FASTag ID"
/// - `vehicleNumber`: "Please enter a valid vehicle registration number (e.g., MH01AB1234)"
pub fn validate_link_tag_form(tag_id: &str, vehicle_number: &str) -> Result<LinkTagInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    if !is_valid_tag_id(tag_id) {
        errors.insert("tagId", "Please enter a valid 16-digit FASTag ID");
    }
    if !is_valid_vehicle_number(vehicle_number) {
        errors.insert(
            "vehicleNumber",
            "Please enter a valid vehicle registration number (e.g., MH01AB1234)",
        );
    }

    errors.into_result(LinkTagInput {
        tag_id: tag_id.to_string(),
        vehicle_number: vehicle_number.to_uppercase(),
    })
}

/// Normalized input of the link-bank form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBankInput {
    pub bank_name: String,
    pub account_number: String,
    /// Upper-cased.
    pub ifsc_code: String,
}

/// Validates the link-bank form.
///
/// ## Field Messages
/// - `bankName`: "Bank name is required"
/// - `accountNumber`: "Please enter a valid account number (9-18 digits)"
/// - `confirmAccountNumber`: "Account numbers do not match"
/// - `ifscCode`: "Please enter a valid IFSC code"
pub fn validate_link_bank_form(
    bank_name: &str,
    account_number: &str,
    confirm_account_number: &str,
    ifsc_code: &str,
) -> Result<LinkBankInput, FieldErrors> {
    let mut errors = FieldErrors::new();
    let ifsc_code = ifsc_code.to_uppercase();

    if bank_name.trim().is_empty() {
        errors.insert("bankName", "Bank name is required");
    }
    if !is_valid_account_number(account_number) {
        errors.insert("accountNumber", "Please enter a valid account number (9-18 digits)");
    }
    if account_number != confirm_account_number {
        errors.insert("confirmAccountNumber", "Account numbers do not match");
    }
    if !is_valid_ifsc_code(&ifsc_code) {
        errors.insert("ifscCode", "Please enter a valid IFSC code");
    }

    errors.into_result(LinkBankInput {
        bank_name: bank_name.trim().to_string(),
        account_number: account_number.to_string(),
        ifsc_code,
    })
}

/// Normalized input of the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Validates the two-step registration form.
pub fn validate_registration_form(
    name: &str,
    email: &str,
    phone: &str,
    password: &str,
    confirm_password: &str,
) -> Result<RegistrationInput, FieldErrors> {
    let mut errors = FieldErrors::new();
    let email = email.trim();

    if name.trim().is_empty() {
        errors.insert("name", "Full name is required");
    }
    if email.is_empty() {
        errors.insert("email", "Email is required");
    } else if !looks_like_email(email) {
        errors.insert("email", "Please enter a valid email address");
    }
    if phone.trim().is_empty() {
        errors.insert("phone", "Phone number is required");
    }
    if let Err(e) = validate_password(password) {
        errors.insert("password", e.to_string());
    }
    if !passwords_match(password, confirm_password) {
        errors.insert("confirmPassword", "Passwords do not match");
    }

    errors.into_result(RegistrationInput {
        name: name.trim().to_string(),
        email: email.to_string(),
        phone: phone.trim().to_string(),
        password: password.to_string(),
    })
}

// Same leniency as a browser's type="email" input: something@something.
fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Validates the amounts present in an auto-recharge update.
///
/// Absent fields are not checked. The toggle is always accepted.
pub fn validate_auto_recharge_form(update: &AutoRechargeUpdate) -> Result<AutoRechargeUpdate, FieldErrors> {
    let mut errors = FieldErrors::new();

    if let Some(threshold) = update.min_threshold {
        if let Err(e) = validate_stepped_amount("minThreshold", threshold, THRESHOLD_RANGE) {
            errors.insert("minThreshold", e.to_string());
        }
    }
    if let Some(amount) = update.recharge_amount {
        if let Err(e) = validate_stepped_amount("rechargeAmount", amount, RECHARGE_AMOUNT_RANGE) {
            errors.insert("rechargeAmount", e.to_string());
        }
    }

    errors.into_result(*update)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_number_boundaries() {
        assert!(!is_valid_account_number("12345678"));
        assert!(is_valid_account_number("123456789"));
        assert!(is_valid_account_number(&"9".repeat(18)));
        assert!(!is_valid_account_number(&"9".repeat(19)));
        assert!(!is_valid_account_number("12345678a"));
        assert!(!is_valid_account_number(""));
    }

    #[test]
    fn test_ifsc_code() {
        assert!(is_valid_ifsc_code("SBIN0123456"));
        assert!(is_valid_ifsc_code("HDFC0ABC12Z"));

        assert!(!is_valid_ifsc_code("SBIN1123456"));
        assert!(!is_valid_ifsc_code("SBI00123456"));
        assert!(!is_valid_ifsc_code("SBIN012345"));
        assert!(!is_valid_ifsc_code("sbin0123456"));
    }

    #[test]
    fn test_vehicle_number() {
        assert!(is_valid_vehicle_number("MH01AB1234"));
        assert!(is_valid_vehicle_number("DL05C4321"));
        assert!(is_valid_vehicle_number("ka03mn0001"));

        assert!(!is_valid_vehicle_number("MH1AB1234"));
        assert!(!is_valid_vehicle_number("MH01ABC1234"));
        assert!(!is_valid_vehicle_number("MH01AB123"));
        assert!(!is_valid_vehicle_number("MH 01 AB 1234"));
    }

    #[test]
    fn test_tag_id() {
        assert!(is_valid_tag_id("1234567890123456"));
        assert!(!is_valid_tag_id("123456789012345"));
        assert!(!is_valid_tag_id("12345678901234567"));
        assert!(!is_valid_tag_id("12345678901234ab"));
    }

    #[test]
    fn test_password_strength_flags() {
        let strength = PasswordStrength::evaluate("abcdefgh");
        assert!(strength.has_min_length);
        assert!(strength.has_lowercase);
        assert!(!strength.has_uppercase);
        assert!(!strength.has_digit);
        assert!(!strength.has_symbol);
        assert_eq!(
            strength.missing_rules(),
            vec!["an uppercase letter", "a number", "a special character"]
        );

        assert!(PasswordStrength::evaluate("Abcdef1!").is_strong());
        assert!(!PasswordStrength::evaluate("Abcde1!").is_strong());
        // '-' is not in the accepted symbol set
        assert!(!PasswordStrength::evaluate("Abcdef1-").is_strong());
    }

    #[test]
    fn test_link_tag_form_reports_each_field() {
        let errors = validate_link_tag_form("123", "XX").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("tagId"), Some("Please enter a valid 16-digit FASTag ID"));
        assert!(errors.contains("vehicleNumber"));

        let errors = validate_link_tag_form("1234567890123456", "XX").unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["vehicleNumber"]);
    }

    #[test]
    fn test_link_bank_form() {
        let input =
            validate_link_bank_form("State Bank of India", "123456789", "123456789", "sbin0123456")
                .unwrap();
        assert_eq!(input.ifsc_code, "SBIN0123456");

        let errors = validate_link_bank_form("", "123456789", "123456780", "SBIN1123456").unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["bankName", "confirmAccountNumber", "ifscCode"]
        );
        assert_eq!(errors.get("confirmAccountNumber"), Some("Account numbers do not match"));
    }

    #[test]
    fn test_registration_form() {
        assert!(validate_registration_form(
            "Asha Rao",
            "asha@example.com",
            "9876543210",
            "Secur3!pass",
            "Secur3!pass"
        )
        .is_ok());

        let errors =
            validate_registration_form("", "not-an-email", "", "short", "other").unwrap_err();
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["confirmPassword", "email", "name", "password", "phone"]
        );
    }

    #[test]
    fn test_auto_recharge_form_ranges() {
        let ok = AutoRechargeUpdate::default()
            .min_threshold(Money::from_rupees(400))
            .recharge_amount(Money::from_rupees(5000));
        assert!(validate_auto_recharge_form(&ok).is_ok());

        let bad = AutoRechargeUpdate::default()
            .min_threshold(Money::from_rupees(50))
            .recharge_amount(Money::from_rupees(250));
        let errors = validate_auto_recharge_form(&bad).unwrap_err();
        assert!(errors.contains("minThreshold"));
        assert_eq!(
            errors.get("rechargeAmount"),
            Some("rechargeAmount must be in steps of ₹100.00")
        );

        // Only the toggle: nothing to range-check.
        assert!(validate_auto_recharge_form(&AutoRechargeUpdate::default().enabled(true)).is_ok());
    }

    #[test]
    fn test_recharge_amount() {
        assert!(validate_recharge_amount(Money::from_rupees(200)).is_ok());
        assert!(validate_recharge_amount(Money::zero()).is_err());
        assert!(validate_recharge_amount(Money::from_rupees(-5)).is_err());
    }
}
