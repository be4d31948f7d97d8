//! Name capitalization utility.
//!
//! Normalizes mixed-case name input by title-casing each word, with special
//! handling for hyphenated and apostrophe-containing names ("mary-jane"
//! becomes "Mary-Jane", "o'brien" becomes "O'Brien").

/// Title-case each space-separated word of `text`.
///
/// The input is lowercased first, so the function is idempotent. Hyphenated
/// words capitalize each hyphen part; within a part, the letter after an
/// apostrophe is capitalized when followed by more letters ("o'brien" to
/// "O'Brien") and uppercased outright when it stands alone ("o's" to "O'S").
#[must_use]
pub fn capitalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    text.to_lowercase()
        .split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    if word.contains('-') {
        return word
            .split('-')
            .map(capitalize_part)
            .collect::<Vec<_>>()
            .join("-");
    }

    capitalize_part(word)
}

fn capitalize_part(part: &str) -> String {
    if !part.contains('\'') {
        return upper_first(part);
    }

    part.split('\'')
        .enumerate()
        .map(|(index, segment)| {
            if index == 0 || segment.chars().count() > 1 {
                upper_first(segment)
            } else {
                segment.to_uppercase()
            }
        })
        .collect::<Vec<_>>()
        .join("'")
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
