//! Identity record and its validated components.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use super::password::PasswordHash;

/// Validation errors raised while building identity components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Email was missing or blank.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email lacked a local part, an `@`, or a domain.
    #[error("enter a valid email address")]
    InvalidEmail,
    /// Email exceeded the storage limit.
    #[error("email must be at most {max} characters")]
    EmailTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Name was blank once trimmed.
    #[error("name must not be blank")]
    EmptyName,
    /// Name exceeded the storage limit.
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Password was shorter than the policy minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted length.
        min: usize,
    },
    /// A stored password hash was empty.
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
}

impl UserValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::InvalidEmail | Self::EmailTooLong { .. } => "email",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::PasswordTooShort { .. } | Self::EmptyPasswordHash => "password",
        }
    }

    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "empty_email",
            Self::InvalidEmail => "invalid_email",
            Self::EmailTooLong { .. } => "email_too_long",
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::PasswordTooShort { .. } => "password_too_short",
            Self::EmptyPasswordHash => "empty_password_hash",
        }
    }
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID read from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum stored email length.
pub const EMAIL_MAX: usize = 255;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One separator, no whitespace; length is checked separately.
        let pattern = r"^[^\s@]+@[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised email address used as the identity key.
///
/// ## Invariants
/// - Non-empty, with a non-empty local part and domain around a single `@`.
/// - The domain is lowercase. The local part keeps the caller's casing.
///
/// # Examples
/// ```
/// use recipe_backend::domain::Email;
///
/// let email = Email::new("Test2@Example.com").unwrap();
/// assert_eq!(email.as_ref(), "Test2@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise raw email input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        let Some((local, domain)) = trimmed.rsplit_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        // Lowercasing can lengthen the domain, so measure the stored form.
        let normalised = format!("{local}@{}", domain.to_lowercase());
        if normalised.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        Ok(Self(normalised))
    }

    /// Portion before the `@`, exactly as supplied.
    pub fn local_part(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(local, _)| local)
    }

    /// Lowercased portion after the `@`.
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map_or("", |(_, domain)| domain)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Maximum allowed length for a display name.
pub const NAME_MAX: usize = 255;

/// Human readable name for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`]; surrounding whitespace is trimmed.
    pub fn new(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Account flags carried by every identity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFlags {
    /// Inactive accounts cannot authenticate.
    pub is_active: bool,
    /// Staff may access administrative tooling.
    pub is_staff: bool,
    /// Superusers hold every permission.
    pub is_superuser: bool,
}

impl Default for UserFlags {
    fn default() -> Self {
        Self {
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }
}

/// Stored identity record.
///
/// Deliberately not serialisable: adapters expose [`UserProfile`] instead so
/// the password hash never leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    name: Option<DisplayName>,
    password_hash: PasswordHash,
    flags: UserFlags,
}

impl User {
    /// Build a record from validated components with default flags.
    pub fn new(id: UserId, email: Email, name: Option<DisplayName>, password_hash: PasswordHash) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
            flags: UserFlags::default(),
        }
    }

    /// Replace the account flags.
    #[must_use]
    pub fn with_flags(mut self, flags: UserFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Replace the display name.
    #[must_use]
    pub fn with_name(mut self, name: DisplayName) -> Self {
        self.name = Some(name);
        self
    }

    /// Replace the email address.
    #[must_use]
    pub fn with_email(mut self, email: Email) -> Self {
        self.email = email;
        self
    }

    /// Replace the password hash.
    #[must_use]
    pub fn with_password_hash(mut self, password_hash: PasswordHash) -> Self {
        self.password_hash = password_hash;
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Normalised email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Display name, if one was provided.
    pub fn name(&self) -> Option<&DisplayName> {
        self.name.as_ref()
    }

    /// Opaque password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Account flags.
    pub fn flags(&self) -> UserFlags {
        self.flags
    }

    /// Whether the account may authenticate.
    pub fn is_active(&self) -> bool {
        self.flags.is_active
    }

    /// Whether the account is staff.
    pub fn is_staff(&self) -> bool {
        self.flags.is_staff
    }

    /// Whether the account is a superuser.
    pub fn is_superuser(&self) -> bool {
        self.flags.is_superuser
    }

    /// Client-safe projection of this record.
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

/// Projection of a [`User`] that is safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    /// Display name, empty when never set.
    pub name: String,
    /// Normalised email.
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            name: user
                .name()
                .map(|name| name.as_ref().to_owned())
                .unwrap_or_default(),
            email: user.email().as_ref().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests;
