use itertools::Itertools;

/// Placed between two distinct messages.
pub const MESSAGE_SEPARATOR: &str = ". ";
/// Appended after the last message, even when there are none.
pub const MESSAGE_TERMINATOR: &str = ".";

/// Joins error messages into one display string.
///
/// Duplicates are dropped keeping the first occurrence, the rest are joined
/// with [`MESSAGE_SEPARATOR`] and [`MESSAGE_TERMINATOR`] is always appended,
/// so an empty input yields `"."`.
///
/// # Example
/// ```
/// use form_errors_transform::concat_unique_errors;
///
/// assert_eq!(concat_unique_errors(["a", "a", "b"]), "a. b.");
/// assert_eq!(concat_unique_errors(Vec::<&str>::new()), ".");
/// ```
pub fn concat_unique_errors<I, S>(messages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = messages
        .into_iter()
        .map(|message| message.as_ref().to_owned())
        .unique()
        .join(MESSAGE_SEPARATOR);
    joined.push_str(MESSAGE_TERMINATOR);
    joined
}
