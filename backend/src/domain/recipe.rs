//! Recipe records owned by a user.
//!
//! Recipes carry no behaviour beyond validation; storage lives behind
//! [`RecipeRepository`](crate::domain::ports::RecipeRepository).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Maximum stored title length.
pub const TITLE_MAX: usize = 255;

/// Total number of significant digits a price may carry.
pub const PRICE_MAX_DIGITS: usize = 5;

/// Digits stored after the decimal point.
pub const PRICE_DECIMAL_PLACES: usize = 2;

/// Largest representable price, in cents.
pub const PRICE_MAX_CENTS: i64 = 99_999;

/// Validation errors raised while building recipes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    /// Title was blank once trimmed.
    #[error("title must not be blank")]
    EmptyTitle,
    /// Title exceeded the storage limit.
    #[error("title must be at most {max} characters")]
    TitleTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Preparation time was negative.
    #[error("time_minutes must not be negative")]
    NegativeTime,
    /// Price was not a plain non-negative decimal.
    #[error("price must be a non-negative decimal number")]
    InvalidPrice,
    /// Price had more than two digits after the point.
    #[error("price must have at most {max} decimal places")]
    TooManyDecimalPlaces {
        /// Maximum decimal places.
        max: usize,
    },
    /// Price had more significant digits than storage allows.
    #[error("price must have at most {max} digits")]
    TooManyDigits {
        /// Maximum digits.
        max: usize,
    },
}

/// Stable recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed-point price with two decimal places.
///
/// Stored as whole cents so arithmetic and comparisons stay exact.
///
/// # Examples
/// ```
/// use recipe_backend::domain::Price;
///
/// let price: Price = "5".parse().unwrap();
/// assert_eq!(price.cents(), 500);
/// assert_eq!(price.to_string(), "5.00");
/// assert!("1000".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(i64);

impl Price {
    /// Build a price from whole cents.
    pub fn from_cents(cents: i64) -> Result<Self, RecipeValidationError> {
        if cents < 0 {
            return Err(RecipeValidationError::InvalidPrice);
        }
        if cents > PRICE_MAX_CENTS {
            return Err(RecipeValidationError::TooManyDigits {
                max: PRICE_MAX_DIGITS,
            });
        }
        Ok(Self(cents))
    }

    /// Price expressed in cents.
    pub fn cents(self) -> i64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = RecipeValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        let is_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(fraction) {
            return Err(RecipeValidationError::InvalidPrice);
        }
        if fraction.len() > PRICE_DECIMAL_PLACES {
            return Err(RecipeValidationError::TooManyDecimalPlaces {
                max: PRICE_DECIMAL_PLACES,
            });
        }
        let whole = whole.trim_start_matches('0');
        if whole.len() > PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES {
            return Err(RecipeValidationError::TooManyDigits {
                max: PRICE_MAX_DIGITS,
            });
        }

        let padded = format!("{fraction:0<width$}", width = PRICE_DECIMAL_PLACES);
        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .map_err(|_| RecipeValidationError::InvalidPrice)?
        };
        let fraction_cents = padded
            .parse::<i64>()
            .map_err(|_| RecipeValidationError::InvalidPrice)?;
        Self::from_cents(whole_cents * 100 + fraction_cents)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl TryFrom<String> for Price {
    type Error = RecipeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(value: Price) -> Self {
        value.to_string()
    }
}

/// Unvalidated recipe input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    /// Recipe title.
    pub title: String,
    /// Preparation time in minutes.
    pub time_minutes: i32,
    /// Price as entered, e.g. `"5.25"`.
    pub price: String,
    /// Free-form description; may be empty.
    pub description: String,
}

/// Stored recipe.
///
/// ## Invariants
/// - `title` is non-blank and at most [`TITLE_MAX`] characters.
/// - `time_minutes` is non-negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: RecipeId,
    user_id: UserId,
    title: String,
    time_minutes: i32,
    price: Price,
    description: String,
}

impl Recipe {
    /// Validate a draft and assign it a fresh identifier.
    pub fn create(user_id: UserId, draft: RecipeDraft) -> Result<Self, RecipeValidationError> {
        let price = draft.price.parse()?;
        Self::from_parts(
            RecipeId::random(),
            user_id,
            draft.title,
            draft.time_minutes,
            price,
            draft.description,
        )
    }

    /// Rebuild a recipe from already-typed parts, re-checking invariants.
    pub fn from_parts(
        id: RecipeId,
        user_id: UserId,
        title: impl Into<String>,
        time_minutes: i32,
        price: Price,
        description: impl Into<String>,
    ) -> Result<Self, RecipeValidationError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        if title.chars().count() > TITLE_MAX {
            return Err(RecipeValidationError::TitleTooLong { max: TITLE_MAX });
        }
        if time_minutes < 0 {
            return Err(RecipeValidationError::NegativeTime);
        }
        Ok(Self {
            id,
            user_id,
            title,
            time_minutes,
            price,
            description: description.into(),
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> &RecipeId {
        &self.id
    }

    /// Owning user.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Recipe title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Preparation time in minutes.
    pub fn time_minutes(&self) -> i32 {
        self.time_minutes
    }

    /// Price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Description text.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
