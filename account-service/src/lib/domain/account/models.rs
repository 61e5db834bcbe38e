use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountIdError;
use crate::account::errors::EmailError;
use crate::account::errors::PasswordPolicyError;
use crate::account::errors::PersonNameError;
use crate::account::errors::UsernameError;

/// Account aggregate entity.
///
/// `password_hash` is a PHC string and is never part of any outward
/// representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub username: Username,
    pub password_hash: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub is_active: bool,
    pub is_admin: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Store-assigned account identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(i64);

impl AccountId {
    /// Wrap a store-assigned identifier.
    ///
    /// # Errors
    /// * `NotPositive` - Identifier is zero or negative
    pub fn new(id: i64) -> Result<Self, AccountIdError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(AccountIdError::NotPositive(id))
        }
    }

    /// Parse an identifier from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not an integer
    /// * `NotPositive` - Zero or negative
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        let id = s
            .parse::<i64>()
            .map_err(|_| AccountIdError::InvalidFormat(s.to_string()))?;
        Self::new(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// 3-50 characters, alphanumeric plus underscore and hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 3 characters
    /// * `TooLong` - More than 50 characters
    /// * `InvalidCharacters` - Anything other than alphanumerics, `_` and `-`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.chars().count();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser. Stored and compared exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Forward-path limit from RFC 5321; also fits the `users.email` column.
    const MAX_LENGTH: usize = 254;

    /// # Errors
    /// * `TooLong` - More than 254 characters
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// First or last name, trimmed, 1-100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: String) -> Result<Self, PersonNameError> {
        let trimmed = name.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            return Err(PersonNameError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password accepted for registration.
///
/// Only lives long enough to be hashed. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.chars().count() < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// Command to create an account, from self-registration or an admin.
#[derive(Debug, Clone)]
pub struct CreateAccountCommand {
    pub email: EmailAddress,
    pub username: Username,
    pub password: Password,
    pub first_name: PersonName,
    pub last_name: PersonName,
}

/// Row to insert. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub email: EmailAddress,
    pub username: Username,
    pub password_hash: String,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub is_active: bool,
    pub is_admin: bool,
}

/// Partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountCommand {
    pub email: Option<EmailAddress>,
    pub username: Option<Username>,
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
}

/// Page selection for listing accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    /// Build a page selection from raw query values.
    ///
    /// A missing or non-positive page falls back to 1. A missing limit, or
    /// one outside 1..=100, falls back to 10.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page
            .filter(|p| *p > 0)
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(Self::DEFAULT_PAGE);
        let limit = limit
            .filter(|l| (1..=i64::from(Self::MAX_LIMIT)).contains(l))
            .and_then(|l| u32::try_from(l).ok())
            .unwrap_or(Self::DEFAULT_LIMIT);

        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// One page of accounts plus the total across all pages.
#[derive(Debug, Clone)]
pub struct AccountPage {
    pub accounts: Vec<Account>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

impl AccountPage {
    pub fn total_pages(&self) -> i64 {
        let limit = i64::from(self.limit.max(1));
        (self.total + limit - 1) / limit
    }
}

/// Connection pool snapshot taken right after a successful store ping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub open_connections: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

/// Successful login: a fresh token and the account it was issued for.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub access_token: String,
    pub account: Account,
}
