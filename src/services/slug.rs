/*
 * Responsibility
 * - Derive a URL-safe slug from a post title
 * - Recomputed whenever the title changes; uniqueness is enforced by the
 *   store (unique index on posts.slug)
 */

/// Lowercase, spaces become hyphens, everything outside `[a-z0-9_-]` is
/// dropped. Deterministic: the same title always yields the same slug.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c == ' ' {
                Some('-')
            } else if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn strips_punctuation_but_keeps_hyphens() {
        assert_eq!(slugify("How to Be Iron-Man!"), "how-to-be-iron-man");
    }

    #[test]
    fn deterministic_for_same_title() {
        let a = slugify("How to Be Iron-Man!");
        let b = slugify("How to Be Iron-Man!");
        assert_eq!(a, b);
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(slugify("Café au lait"), "caf-au-lait");
    }

    #[test]
    fn keeps_underscores_and_digits() {
        assert_eq!(slugify("my_post 2 of 3"), "my_post-2-of-3");
    }
}
