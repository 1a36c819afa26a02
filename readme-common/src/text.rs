//! Two-line text layout for card descriptions

/// Marker appended to a second line that had to be cut.
pub const ELLIPSIS: &str = "...";

/// Lay `text` out on two display lines of at most `max_len` characters.
///
/// Words are packed greedily into the first line. Everything from the first
/// word that does not fit goes to the second line, which is cut to
/// `max_len - 3` characters plus `"..."` when it is still too long.
///
/// The first word is always placed on the first line, even when it alone is
/// longer than `max_len`. It is never truncated.
///
/// Lengths are counted in `char`s. Budgets below `ELLIPSIS.len() + 1` cannot
/// hold a cut second line; callers keep `max_len` at or above that bound.
pub fn wrap_text(text: &str, max_len: usize) -> (String, String) {
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut line1_len = 0usize;
    let mut taken = 0usize;

    for word in &words {
        let word_len = word.chars().count();
        let candidate = if taken == 0 {
            word_len
        } else {
            line1_len + 1 + word_len
        };

        if taken > 0 && candidate > max_len {
            break;
        }
        line1_len = candidate;
        taken += 1;
    }

    let line1 = words[..taken].join(" ");
    let remaining = words[taken..].join(" ");

    let line2 = if remaining.chars().count() > max_len {
        let kept: String = remaining
            .chars()
            .take(max_len.saturating_sub(ELLIPSIS.len()))
            .collect();
        format!("{}{}", kept, ELLIPSIS)
    } else {
        remaining
    };

    (line1, line2)
}
