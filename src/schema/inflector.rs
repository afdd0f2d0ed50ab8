const IRREGULAR: [(&str, &str); 6] = [
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
];

/// Minimal English pluralization used to build join alias candidates
/// (`parent` -> `parents_people`). Words that already look plural are
/// returned unchanged, so `children` stays `children`.
pub struct Inflector;

impl Inflector {
    /// Only the last `_`-separated segment is inflected.
    pub fn pluralize(word: &str) -> String {
        let last = word.rsplit('_').next().unwrap_or(word);
        let prefix = &word[..word.len() - last.len()];
        let lower = last.to_ascii_lowercase();

        for (singular, plural) in IRREGULAR {
            if lower == plural {
                return word.to_string();
            }
            if lower == singular {
                return format!("{}{}", prefix, plural);
            }
        }

        if ["ss", "sh", "ch", "x", "z", "us"].iter().any(|suffix| lower.ends_with(suffix)) {
            return format!("{}es", word);
        }

        if lower.ends_with('s') {
            return word.to_string();
        }

        if let Some(stem) = lower.strip_suffix('y') {
            let before = stem.chars().last();
            if before.is_some_and(|c| !"aeiou".contains(c)) {
                return format!("{}ies", &word[..word.len() - 1]);
            }
        }

        format!("{}s", word)
    }
}
