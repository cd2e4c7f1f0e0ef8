//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn sample_hash() -> PasswordHash {
    PasswordHash::new("fixture$73616d706c65").expect("non-empty hash")
}

#[fixture]
fn sample_user(sample_hash: PasswordHash) -> User {
    User::new(
        UserId::from_uuid(Uuid::parse_str(VALID_ID).expect("valid uuid")),
        Email::new("ada@example.com").expect("valid email"),
        Some(DisplayName::new("Ada Lovelace").expect("valid name")),
        sample_hash,
    )
}

#[rstest]
#[case("test1@Example.com", "test1@example.com")]
#[case("Test2@Example.com", "Test2@example.com")]
#[case("TEST3@Example.com", "TEST3@example.com")]
#[case("test4@example.COM", "test4@example.com")]
#[case("  padded@Example.org ", "padded@example.org")]
fn email_lowercases_only_the_domain(#[case] raw: &str, #[case] expected: &str) {
    let email = Email::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("test.example.com", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("someone@", UserValidationError::InvalidEmail)]
#[case("a@b@example.com", UserValidationError::InvalidEmail)]
#[case("with space@example.com", UserValidationError::InvalidEmail)]
fn email_rejects_empty_and_malformed_input(
    #[case] raw: &str,
    #[case] expected: UserValidationError,
) {
    let err = Email::new(raw).expect_err("invalid email must fail");
    assert_eq!(err, expected);
    assert_eq!(err.field(), "email");
}

#[rstest]
fn email_rejects_overlong_addresses() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    let err = Email::new(raw).expect_err("overlong email must fail");
    assert_eq!(err, UserValidationError::EmailTooLong { max: EMAIL_MAX });
}

#[rstest]
fn email_at_the_length_limit_is_accepted() {
    let domain = "@example.com";
    let raw = format!("{}{domain}", "a".repeat(EMAIL_MAX - domain.len()));
    let email = Email::new(&raw).expect("limit-length email is valid");
    assert_eq!(email.as_ref().chars().count(), EMAIL_MAX);
}

#[rstest]
fn email_length_is_measured_after_lowercasing_the_domain() {
    // 'İ' lowercases to two characters, pushing the stored form past the limit.
    let domain = format!("@{}.com", "İ".repeat(10));
    let raw = format!("{}{domain}", "a".repeat(EMAIL_MAX - domain.chars().count()));
    assert_eq!(raw.chars().count(), EMAIL_MAX);

    let err = Email::new(&raw).expect_err("normalised email exceeds the limit");
    assert_eq!(err, UserValidationError::EmailTooLong { max: EMAIL_MAX });
}

#[rstest]
fn email_exposes_parts() {
    let email = Email::new("Mixed.Case@Sub.Example.COM").expect("valid email");
    assert_eq!(email.local_part(), "Mixed.Case");
    assert_eq!(email.domain(), "sub.example.com");
}

#[rstest]
fn email_normalisation_is_idempotent() {
    let once = Email::new("Someone@EXAMPLE.com").expect("valid email");
    let twice = Email::new(once.as_ref()).expect("normalised email stays valid");
    assert_eq!(once, twice);
}

#[rstest]
fn user_id_round_trips_through_display() {
    let id = UserId::from_uuid(Uuid::parse_str(VALID_ID).expect("valid uuid"));
    assert_eq!(id.to_string(), VALID_ID);
    assert_eq!(UserId::from_uuid(*id.as_uuid()), id);
}

#[rstest]
#[case("   ", UserValidationError::EmptyName)]
#[case("", UserValidationError::EmptyName)]
fn display_name_rejects_blank_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(DisplayName::new(raw).expect_err("blank name"), expected);
}

#[rstest]
fn display_name_trims_and_limits_length() {
    let name = DisplayName::new("  Grace Hopper ").expect("valid name");
    assert_eq!(name.as_ref(), "Grace Hopper");

    let err = DisplayName::new("n".repeat(NAME_MAX + 1)).expect_err("overlong name");
    assert_eq!(err, UserValidationError::NameTooLong { max: NAME_MAX });
}

#[rstest]
fn new_user_defaults_to_active_non_staff(sample_user: User) {
    assert!(sample_user.is_active());
    assert!(!sample_user.is_staff());
    assert!(!sample_user.is_superuser());
}

#[rstest]
fn profile_projection_excludes_password(sample_user: User) {
    let value = serde_json::to_value(sample_user.profile()).expect("profile serialises");
    assert_eq!(
        value,
        serde_json::json!({ "name": "Ada Lovelace", "email": "ada@example.com" })
    );
}

#[rstest]
fn profile_projection_uses_empty_name_when_unset(sample_hash: PasswordHash) {
    let user = User::new(
        UserId::random(),
        Email::new("nameless@example.com").expect("valid email"),
        None,
        sample_hash,
    );
    assert_eq!(user.profile().name, "");
}

#[rstest]
fn builder_methods_replace_fields(sample_user: User) {
    let updated = sample_user
        .clone()
        .with_name(DisplayName::new("Countess").expect("valid name"))
        .with_email(Email::new("countess@example.com").expect("valid email"))
        .with_flags(UserFlags {
            is_active: false,
            is_staff: true,
            is_superuser: true,
        });

    assert_eq!(updated.id(), sample_user.id());
    assert_eq!(updated.name().map(AsRef::as_ref), Some("Countess"));
    assert_eq!(updated.email().as_ref(), "countess@example.com");
    assert!(!updated.is_active());
    assert!(updated.is_superuser());
    assert_eq!(updated.password_hash(), sample_user.password_hash());
}
