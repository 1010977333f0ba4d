use anyhow::Result;
use std::time::{SystemTime, UNIX_EPOCH};

/// Return the current Unix epoch in milliseconds.
pub fn now_epoch_millis() -> Result<u64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64)
}

/// First `max_chars` Unicode characters of `input`, without any marker.
pub fn take_chars(input: &str, max_chars: usize) -> String {
    input.chars().take(max_chars).collect()
}

/// Truncate `input` to at most `max_chars` Unicode characters, stripping
/// control characters and appending `…` when truncated.
pub fn truncate_with_ellipsis(input: &str, max_chars: usize) -> String {
    let clean: String = input.chars().filter(|c| !c.is_control()).collect();
    if clean.chars().count() > max_chars {
        let mut s: String = clean.chars().take(max_chars).collect();
        s.push('…');
        s
    } else {
        clean
    }
}

#[cfg(test)]
mod tests {
    use super::{take_chars, truncate_with_ellipsis};

    #[test]
    fn take_chars_respects_char_boundaries() {
        assert_eq!(take_chars("héllo wörld", 4), "héll");
        assert_eq!(take_chars("ab", 10), "ab");
    }

    #[test]
    fn truncate_with_ellipsis_strips_control_chars() {
        assert_eq!(truncate_with_ellipsis("a\nb\tc", 10), "abc");
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc…");
    }
}
