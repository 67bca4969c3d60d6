//! Contact form submissions.
//!
//! Every user supplied field goes through [`sanitize_text`] before it is
//! validated or used anywhere else.

use std::sync::LazyLock;

use nutype::nutype;
use regex::Regex;
use thiserror::Error;

pub static HTML_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new("<[^>]*?>").unwrap());

pub static EMAIL_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Removes anything that looks like an HTML tag and trims surrounding
/// whitespace. Applying it twice yields the same result as applying it once.
pub fn sanitize_text(value: String) -> String {
    HTML_TAG_REGEX.replace_all(&value, "").trim().to_owned()
}

/// Checks for a `local@domain.tld` shaped address.
pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE_REGEX.is_match(value)
}

/// The fields of a submission exactly as they were received.
///
/// Missing fields are represented as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: Option<ContactPhone>,
    pub message: ContactMessageContent,
}

#[nutype(
    sanitize(with = sanitize_text),
    validate(not_empty, len_char_max = 100),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(with = sanitize_text),
    validate(not_empty, len_char_max = 255),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    sanitize(with = sanitize_text),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactPhone(String);

#[nutype(
    sanitize(with = sanitize_text),
    validate(not_empty, len_char_max = 5000),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactSubmissionError {
    #[error("Name, email, and message are required")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Input too long")]
    TooLong,
}

impl ContactSubmission {
    /// Sanitizes and validates a raw submission.
    ///
    /// Checks run in a fixed order: required fields, email shape, length
    /// limits. The first failing check determines the error.
    pub fn parse(raw: RawContactSubmission) -> Result<Self, ContactSubmissionError> {
        let name = sanitize_text(raw.name);
        let email = sanitize_text(raw.email);
        let phone = sanitize_text(raw.phone);
        let message = sanitize_text(raw.message);

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ContactSubmissionError::MissingFields);
        }

        if !is_email_shaped(&email) {
            return Err(ContactSubmissionError::InvalidEmail);
        }

        Ok(Self {
            name: ContactName::try_new(name)?,
            email: ContactEmail::try_new(email)?,
            phone: ContactPhone::try_new(phone).ok(),
            message: ContactMessageContent::try_new(message)?,
        })
    }
}

macro_rules! length_errors {
    ($($error:ident),* $(,)?) => { $(
        impl From<$error> for ContactSubmissionError {
            fn from(value: $error) -> Self {
                match value {
                    $error::NotEmptyViolated => Self::MissingFields,
                    $error::LenCharMaxViolated => Self::TooLong,
                }
            }
        }
    )* };
}

length_errors!(ContactNameError, ContactEmailError, ContactMessageContentError);

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use relay_utils::assert_matches;

    use super::*;

    fn raw(name: &str, email: &str, phone: &str, message: &str) -> RawContactSubmission {
        RawContactSubmission {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            message: message.into(),
        }
    }

    #[test]
    fn sanitize_strips_tags_and_trims() {
        for (input, expected) in [
            ("  Max Mustermann  ", "Max Mustermann"),
            ("<b>bold</b> move", "bold move"),
            ("<script>alert(1)</script>", "alert(1)"),
            ("<a href=\"x\">link</a>\n", "link"),
            ("1 < 2", "1 < 2"),
            ("a > b", "a > b"),
            ("<<nested>>", ">"),
            ("<img\nsrc=x>text", "text"),
            ("", ""),
        ] {
            assert_eq!(sanitize_text(input.into()), expected, "input: {input:?}");
        }
    }

    #[test]
    fn sanitize_output_contains_no_tags() {
        for input in [
            "<p>Hello</p><br/>World",
            "x<y>z<<<>>>",
            "<div class='a'><span>inner</span></div>",
            "  <i>  </i>  ",
        ] {
            let output = sanitize_text(input.into());
            assert!(!HTML_TAG_REGEX.is_match(&output), "{input:?} -> {output:?}");
        }
    }

    #[test]
    fn sanitize_is_idempotent() {
        for input in [
            "already clean",
            "Hello,\nWorld!",
            "<em>x</em> < y > z",
            "   padded   ",
            "a<b<c>d>e",
        ] {
            let once = sanitize_text(input.into());
            let twice = sanitize_text(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn email_shape() {
        for (input, expected) in [
            ("a@b.co", true),
            ("max.mustermann@example.de", true),
            ("user+tag@sub.example.com", true),
            ("not-an-email", false),
            ("a@b", false),
            ("@b.co", false),
            ("a@.co", false),
            ("a@b.", false),
            ("a b@c.de", false),
            ("a@@b.co", false),
        ] {
            assert_eq!(is_email_shaped(input), expected, "input: {input:?}");
        }
    }

    #[test]
    fn parse_ok() {
        let submission = ContactSubmission::parse(raw(
            " <b>Max</b> ",
            "max@example.de",
            "+49 123",
            "Hello\nWorld",
        ))
        .unwrap();

        assert_eq!(*submission.name, "Max");
        assert_eq!(*submission.email, "max@example.de");
        assert_eq!(submission.phone.as_deref().map(String::as_str), Some("+49 123"));
        assert_eq!(*submission.message, "Hello\nWorld");
    }

    #[test]
    fn parse_empty_phone_is_absent() {
        let submission =
            ContactSubmission::parse(raw("Max", "max@example.de", "  <br>  ", "Hi")).unwrap();
        assert_eq!(submission.phone, None);
    }

    #[test]
    fn parse_missing_fields() {
        for raw in [
            raw("", "max@example.de", "", "Hi"),
            raw("Max", "", "", "Hi"),
            raw("Max", "max@example.de", "", ""),
            raw("<b></b>", "max@example.de", "", "Hi"),
            raw("Max", "max@example.de", "", "   \n\t "),
            RawContactSubmission::default(),
        ] {
            assert_matches!(
                ContactSubmission::parse(raw),
                Err(ContactSubmissionError::MissingFields)
            );
        }
    }

    #[test]
    fn parse_missing_takes_precedence() {
        let long = "x".repeat(101);
        assert_matches!(
            ContactSubmission::parse(raw(&long, "not-an-email", "", "")),
            Err(ContactSubmissionError::MissingFields)
        );
    }

    #[test]
    fn parse_invalid_email() {
        assert_matches!(
            ContactSubmission::parse(raw("Max", "not-an-email", "", "Hi")),
            Err(ContactSubmissionError::InvalidEmail)
        );
        let submission = ContactSubmission::parse(raw("Max", "a@b.co", "", "Hi")).unwrap();
        assert_eq!(*submission.email, "a@b.co");
    }

    #[test]
    fn parse_invalid_email_takes_precedence_over_length() {
        let long = "x".repeat(101);
        assert_matches!(
            ContactSubmission::parse(raw(&long, "not-an-email", "", "Hi")),
            Err(ContactSubmissionError::InvalidEmail)
        );
    }

    #[test]
    fn parse_length_limits() {
        let ok = |name: &str, email: &str, message: &str| {
            ContactSubmission::parse(raw(name, email, "", message))
        };
        let email_of_len = |len: usize| format!("{}@b.co", "a".repeat(len - 5));

        ok(&"n".repeat(100), "a@b.co", "Hi").unwrap();
        assert_matches!(
            ok(&"n".repeat(101), "a@b.co", "Hi"),
            Err(ContactSubmissionError::TooLong)
        );

        ok("Max", &email_of_len(255), "Hi").unwrap();
        assert_matches!(
            ok("Max", &email_of_len(256), "Hi"),
            Err(ContactSubmissionError::TooLong)
        );

        ok("Max", "a@b.co", &"m".repeat(5000)).unwrap();
        assert_matches!(
            ok("Max", "a@b.co", &"m".repeat(5001)),
            Err(ContactSubmissionError::TooLong)
        );
    }

    #[test]
    fn parse_length_is_checked_after_sanitation() {
        let message = format!("<p>{}</p>   ", "m".repeat(5000));
        let submission = ContactSubmission::parse(raw("Max", "a@b.co", "", &message)).unwrap();
        assert_eq!(submission.message.chars().count(), 5000);
    }

    #[test]
    fn parse_length_counts_chars() {
        ContactSubmission::parse(raw(&"ü".repeat(100), "a@b.co", "", "Hi")).unwrap();
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ContactSubmissionError::MissingFields.to_string(),
            "Name, email, and message are required"
        );
        assert_eq!(
            ContactSubmissionError::InvalidEmail.to_string(),
            "Invalid email format"
        );
        assert_eq!(ContactSubmissionError::TooLong.to_string(), "Input too long");
    }
}
