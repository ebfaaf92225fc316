//! Attribute name conversion.
//!
//! Component properties are declared in camelCase (`iconName`) and exposed to
//! markup in kebab-case (`icon-name`). Every ASCII capital after the first
//! character starts a new word.

/// Split an identifier into words at each internal ASCII capital.
///
/// The first segment keeps a leading capital as-is, so `"Foo"` is a single
/// segment rather than an empty word followed by `"Foo"`.
pub fn split_words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;

    for (i, ch) in name.char_indices() {
        if i > 0 && ch.is_ascii_uppercase() {
            words.push(&name[start..i]);
            start = i;
        }
    }

    if start < name.len() {
        words.push(&name[start..]);
    }

    words
}

/// Convert a camelCase property name to its kebab-case attribute name.
///
/// Example: `"fooBarBaz"` -> `"foo-bar-baz"`
pub fn to_kebab(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + name.len() / 2);

    for (i, word) in split_words(name).into_iter().enumerate() {
        if i == 0 {
            result.push_str(word);
        } else {
            result.push('-');
            result.push_str(&word.to_ascii_lowercase());
        }
    }

    result
}
