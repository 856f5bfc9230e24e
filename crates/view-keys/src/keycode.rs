//! Key name and key code table.

/// Canonical key names in lookup order.
///
/// Reverse lookups walk this slice front to back, so the first name
/// listed for a code is the one [`name_of`] reports.
const KEYS: &[(&str, u32)] = &[
    ("backspace", 8),
    ("tab", 9),
    ("enter", 13),
    ("space", 32),
    // Temporal modifiers
    ("shift", 16),
    ("ctrl", 17),
    ("alt", 18),
    ("meta", 91),
    // Modal
    ("caps_lock", 20),
    ("esc", 27),
    ("num_lock", 144),
    // Navigation
    ("page_up", 33),
    ("page_down", 34),
    ("end", 35),
    ("home", 36),
    ("left", 37),
    ("up", 38),
    ("right", 39),
    ("down", 40),
    // Insert/delete
    ("insert", 45),
    ("delete", 46),
    // Function keys
    ("f1", 112),
    ("f2", 113),
    ("f3", 114),
    ("f4", 115),
    ("f5", 116),
    ("f6", 117),
    ("f7", 118),
    ("f8", 119),
    ("f9", 120),
    ("f10", 121),
    ("f11", 122),
    ("f12", 123),
    ("fslash", 191),
];

/// Platform aliases and the canonical name each one stands for.
const ALIASES: &[(&str, &str)] = &[("options", "alt"), ("return", "enter")];

/// Resolve a key name to its key code.
///
/// Single characters map to the code of their uppercase form, so `"s"`
/// and `"S"` both give 83. Longer names are looked up in the table,
/// aliases included. Returns `None` for names the table does not know.
pub fn code_of(name: &str) -> Option<u32> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        // Characters whose uppercase form is several characters keep their own code
        let mut upper = c.to_uppercase();
        return match (upper.next(), upper.next()) {
            (Some(u), None) => Some(u32::from(u)),
            _ => Some(u32::from(c)),
        };
    }

    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, real)| *real)
        .unwrap_or(name);

    KEYS.iter()
        .find(|(key, _)| *key == canonical)
        .map(|(_, code)| *code)
}

/// Best-effort reverse lookup of a key code.
///
/// Returns the first table name declared for `code`; aliases are never
/// reported. Codes without a name fall back to the character they encode.
pub fn name_of(code: u32) -> String {
    KEYS.iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| (*name).to_string())
        .or_else(|| char::from_u32(code).map(String::from))
        .unwrap_or_default()
}

/// Iterate the canonical table entries in declared order.
pub fn names() -> impl Iterator<Item = (&'static str, u32)> {
    KEYS.iter().copied()
}

/// Check whether `name` is one of the alias names.
pub fn is_alias(name: &str) -> bool {
    ALIASES.iter().any(|(alias, _)| *alias == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_characters_use_uppercase_code() {
        assert_eq!(code_of("s"), Some(83));
        assert_eq!(code_of("S"), Some(83));
        assert_eq!(code_of("1"), Some(49));
        assert_eq!(code_of(" "), Some(32));
    }

    #[test]
    fn test_multi_char_uppercase_keeps_own_code() {
        assert_eq!(code_of("ß"), Some(u32::from('ß')));
        assert_ne!(code_of("ß"), code_of("s"));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(code_of("esc"), Some(27));
        assert_eq!(code_of("enter"), Some(13));
        assert_eq!(code_of("f12"), Some(123));
        assert_eq!(code_of("fslash"), Some(191));
        assert_eq!(code_of("nope"), None);
        assert_eq!(code_of(""), None);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(code_of("options"), code_of("alt"));
        assert_eq!(code_of("return"), code_of("enter"));
        assert!(is_alias("return"));
        assert!(!is_alias("enter"));
    }

    #[test]
    fn test_name_of() {
        assert_eq!(name_of(13), "enter");
        assert_eq!(name_of(18), "alt");
        assert_eq!(name_of(83), "S");
    }

    #[test]
    fn test_canonical_round_trip() {
        for (name, code) in names() {
            assert_eq!(name_of(code), name);
            assert_eq!(code_of(&name_of(code)), Some(code));
        }
    }

    proptest! {
        #[test]
        fn prop_name_of_is_never_empty_for_ascii(code in 1u32..256) {
            prop_assert!(!name_of(code).is_empty());
        }

        #[test]
        fn prop_letters_resolve_case_insensitively(c in proptest::char::range('a', 'z')) {
            let lower = c.to_string();
            let upper = c.to_ascii_uppercase().to_string();
            prop_assert_eq!(code_of(&lower), code_of(&upper));
        }
    }
}
