//! Utility functions

use std::borrow::Cow;

/// Undo the form-style encoding S3 applies to keys in notifications.
///
/// Spaces arrive as `+` and everything else percent-encoded. Keys that do not
/// decode to valid UTF-8 are returned unchanged.
pub fn decode_s3_key(key: &str) -> String {
    let plus_decoded = key.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => key.to_string(),
    }
}

/// Make a string acceptable as an SNS subject.
///
/// Control characters become spaces and the result is cut to `max_chars`
/// characters.
pub fn sanitize_subject(subject: &str, max_chars: usize) -> Cow<'_, str> {
    let needs_cleanup = subject.chars().any(char::is_control);
    let too_long = subject.chars().count() > max_chars;

    if !needs_cleanup && !too_long {
        return Cow::Borrowed(subject);
    }

    Cow::Owned(
        subject
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .take(max_chars)
            .collect(),
    )
}
