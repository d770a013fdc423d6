//! # Validation Module
//!
//! Client-side input checks for Hisi Studio.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI arguments (clap)                                         │
//! │  ├── Type checks (numbers, enums)                                      │
//! │  └── Required arguments                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Same rules the backend enforces                                   │
//! │  └── Fails before any request is sent                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Authoritative (uniqueness, credentials, permissions)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hisi_core::validation::{validate_email, validate_password};
//!
//! assert!(validate_email("hello@hisistudio.com").is_ok());
//! assert!(validate_password("Adaptive2024").is_ok());
//! assert!(validate_password("short").is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{ProfileUpdate, RegistrationRequest};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_EMAIL_LEN: usize = 255;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 128;
const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 100;
const MAX_SEARCH_LEN: usize = 100;

// =============================================================================
// Generic Helpers
// =============================================================================

/// Trims `value` and fails when nothing is left.
pub fn require(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Trims `value` and checks its length in characters.
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<String> {
    let value = require(field, value)?;
    let len = value.chars().count();

    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value)
}

// =============================================================================
// Identity Validators
// =============================================================================

/// Validates an email address and returns it trimmed.
///
/// ## Rules
/// - At most 255 characters
/// - `local@domain.tld` where local is `[A-Za-z0-9._%+-]+`, domain is
///   `[A-Za-z0-9.-]+` and the TLD is at least two letters
///
/// ## Example
/// ```rust
/// use hisi_core::validation::validate_email;
///
/// assert!(validate_email("a.b+c@studio.co.ke").is_ok());
/// assert!(validate_email("no-at-sign").is_err());
/// assert!(validate_email("x@y.c").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = require("email", email)?;

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    if !is_email_shaped(&email) {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "not a valid email address".to_string(),
        });
    }

    Ok(email)
}

/// Trims, lower-cases and validates an email (newsletter identity).
pub fn normalize_email(email: &str) -> ValidationResult<String> {
    validate_email(&email.trim().to_lowercase())
}

fn is_email_shaped(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-'));

    let domain_chars_ok = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-'));

    let tld_ok = match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    };

    local_ok && domain_chars_ok && tld_ok
}

/// Validates password strength.
///
/// ## Rules
/// - 8 to 128 characters
/// - At least one uppercase letter, one lowercase letter and one digit
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }
    if len > MAX_PASSWORD_LEN {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_PASSWORD_LEN,
        });
    }

    let checks: [(fn(&char) -> bool, &str); 3] = [
        (char::is_ascii_uppercase, "uppercase letter"),
        (char::is_ascii_lowercase, "lowercase letter"),
        (char::is_ascii_digit, "number"),
    ];
    for (check, requirement) in checks {
        if !password.chars().any(|c| check(&c)) {
            return Err(ValidationError::WeakPassword {
                requirement: requirement.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a person's first or last name and returns it trimmed.
///
/// ## Rules
/// - 2 to 100 characters
/// - ASCII letters, whitespace, hyphens and apostrophes only
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = validate_length(field, name, MIN_NAME_LEN, MAX_NAME_LEN)?;

    if !name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-' || c == '\'')
    {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "contains invalid characters".to_string(),
        });
    }

    Ok(name)
}

/// Validates a Kenyan phone number and returns it without spaces/dashes.
///
/// Accepted shapes: `+2547XXXXXXXX`, `2547XXXXXXXX`, `07XXXXXXXX`
/// (`1` in place of `7` is valid too).
///
/// ## Example
/// ```rust
/// use hisi_core::validation::validate_phone;
///
/// assert_eq!(validate_phone("0712 345-678").unwrap(), "0712345678");
/// assert!(validate_phone("+254812345678").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<String> {
    let cleaned: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if cleaned.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let subscriber = cleaned
        .strip_prefix("+254")
        .or_else(|| cleaned.strip_prefix("254"))
        .or_else(|| cleaned.strip_prefix('0'));

    let valid = match subscriber {
        Some(rest) => {
            rest.len() == 9
                && matches!(rest.as_bytes()[0], b'1' | b'7')
                && rest.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "use +2547XXXXXXXX, 2547XXXXXXXX, or 07XXXXXXXX".to_string(),
        });
    }

    Ok(cleaned)
}

/// Looser phone rule used by the contact and booking forms: any number with
/// at least nine digits once `+`, spaces and dashes are removed.
pub fn validate_contact_phone(phone: &str) -> ValidationResult<String> {
    let phone = require("phone", phone)?;
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '+'))
        .collect();

    if digits.len() < 9 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain at least 9 digits".to_string(),
        });
    }

    Ok(phone)
}

// =============================================================================
// Request Validators
// =============================================================================

/// Login needs both fields; strength rules do not apply to existing
/// passwords.
pub fn validate_login(email: &str, password: &str) -> ValidationResult<String> {
    let email = require("email", email)?;
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    Ok(email)
}

/// Validates a registration and returns a trimmed copy.
pub fn validate_registration(request: &RegistrationRequest) -> ValidationResult<RegistrationRequest> {
    let email = validate_email(&request.email)?;
    validate_password(&request.password)?;
    let first_name = validate_name("first_name", &request.first_name)?;
    let last_name = validate_name("last_name", &request.last_name)?;
    let phone = match request.phone.as_deref() {
        Some(p) if !p.trim().is_empty() => Some(validate_phone(p)?),
        _ => None,
    };

    Ok(RegistrationRequest {
        email,
        password: request.password.clone(),
        first_name,
        last_name,
        phone,
    })
}

/// Validates the fields present in a profile update.
pub fn validate_profile_update(update: &ProfileUpdate) -> ValidationResult<ProfileUpdate> {
    if update.is_empty() {
        return Err(ValidationError::Required {
            field: "profile fields".to_string(),
        });
    }

    Ok(ProfileUpdate {
        first_name: update
            .first_name
            .as_deref()
            .map(|n| validate_name("first_name", n))
            .transpose()?,
        last_name: update
            .last_name
            .as_deref()
            .map(|n| validate_name("last_name", n))
            .transpose()?,
        phone: update.phone.as_deref().map(validate_phone).transpose()?,
    })
}

// =============================================================================
// Content Validators
// =============================================================================

/// Review ratings are whole stars from 1 to 5.
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        });
    }
    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns all/default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

/// Parses a `YYYY-MM-DD` date.
pub fn validate_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    let value = require(field, value)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "expected YYYY-MM-DD".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("hello@hisistudio.com").is_ok());
        assert!(validate_email("first.last+tag@mail.studio.co.ke").is_ok());
        assert_eq!(validate_email("  a@b.io ").unwrap(), "a@b.io");

        assert!(validate_email("").is_err());
        assert!(validate_email("plainaddress").is_err());
        assert!(validate_email("@studio.com").is_err());
        assert!(validate_email("a@studio").is_err());
        assert!(validate_email("a@studio.c").is_err());
        assert!(validate_email("a@studio.c0m").is_err());
        assert!(validate_email("a@@studio.com").is_err());
        assert!(validate_email("a b@studio.com").is_err());
        assert!(validate_email(&format!("{}@x.com", "a".repeat(260))).is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  Hello@HisiStudio.COM ").unwrap(),
            "hello@hisistudio.com"
        );
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Adaptive2024").is_ok());

        assert!(matches!(
            validate_password(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_password("Ab1"),
            Err(ValidationError::TooShort { min: 8, .. })
        ));
        assert!(matches!(
            validate_password(&format!("Aa1{}", "x".repeat(200))),
            Err(ValidationError::TooLong { max: 128, .. })
        ));
        assert_eq!(
            validate_password("adaptive2024").unwrap_err().to_string(),
            "Password must contain at least one uppercase letter"
        );
        assert_eq!(
            validate_password("ADAPTIVE2024").unwrap_err().to_string(),
            "Password must contain at least one lowercase letter"
        );
        assert_eq!(
            validate_password("AdaptiveWear").unwrap_err().to_string(),
            "Password must contain at least one number"
        );
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("first_name", " Amani ").unwrap(), "Amani");
        assert!(validate_name("last_name", "O'Neil-Smith").is_ok());
        assert!(validate_name("first_name", "A").is_err());
        assert!(validate_name("first_name", "R2D2").is_err());
        assert!(validate_name("first_name", &"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert_eq!(validate_phone("+254712345678").unwrap(), "+254712345678");
        assert_eq!(validate_phone("254 112 345 678").unwrap(), "254112345678");
        assert_eq!(validate_phone("0712-345-678").unwrap(), "0712345678");

        assert!(validate_phone("").is_err());
        assert!(validate_phone("0812345678").is_err());
        assert!(validate_phone("071234567").is_err());
        assert!(validate_phone("+2547123456789").is_err());
        assert!(validate_phone("07123456a8").is_err());
        assert!(validate_phone("+1 555 0100").is_err());
    }

    #[test]
    fn test_validate_contact_phone() {
        assert!(validate_contact_phone("+44 20 7946 0958").is_ok());
        assert!(validate_contact_phone("0712345678").is_ok());
        assert!(validate_contact_phone("12345").is_err());
        assert!(validate_contact_phone("call me maybe").is_err());
        assert!(validate_contact_phone("").is_err());
    }

    #[test]
    fn test_validate_registration() {
        let request = RegistrationRequest {
            email: " amani@example.com ".to_string(),
            password: "Adaptive2024".to_string(),
            first_name: "Amani".to_string(),
            last_name: "Wanjiru".to_string(),
            phone: Some("  ".to_string()),
        };
        let clean = validate_registration(&request).unwrap();
        assert_eq!(clean.email, "amani@example.com");
        assert!(clean.phone.is_none());

        let bad = RegistrationRequest {
            password: "weak".to_string(),
            ..request
        };
        assert!(validate_registration(&bad).is_err());
    }

    #[test]
    fn test_validate_profile_update() {
        assert!(validate_profile_update(&ProfileUpdate::default()).is_err());

        let update = ProfileUpdate {
            last_name: Some(" Otieno ".to_string()),
            ..Default::default()
        };
        let clean = validate_profile_update(&update).unwrap();
        assert_eq!(clean.last_name.as_deref(), Some("Otieno"));
        assert!(clean.first_name.is_none());

        let update = ProfileUpdate {
            phone: Some("123".to_string()),
            ..Default::default()
        };
        assert!(validate_profile_update(&update).is_err());
    }

    #[test]
    fn test_validate_login() {
        assert_eq!(validate_login(" a@b.co ", "x").unwrap(), "a@b.co");
        assert!(validate_login("", "x").is_err());
        assert!(validate_login("a@b.co", "").is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_length_counts_chars() {
        assert!(validate_length("message", "ñññññññññ", 10, 20).is_err());
        assert!(validate_length("message", "ññññññññññ", 10, 20).is_ok());
    }

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("selectedDate", "2025-03-14").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert!(validate_date("selectedDate", "14/03/2025").is_err());
        assert!(validate_date("selectedDate", "").is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  wrap dress ").unwrap(), "wrap dress");
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }
}
