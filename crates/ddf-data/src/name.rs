//! Identifier canonicalisation.
//!
//! DDF names and keywords compare case-insensitively and ignore spaces and
//! underscores, so `Rocket Launcher`, `ROCKET_LAUNCHER` and `rocketlauncher`
//! all name the same entry.

use std::cmp::Ordering;

fn significant(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
        .filter(|&c| c != ' ' && c != '_')
        .map(|c| c.to_ascii_uppercase())
}

/// Canonical form used as a lookup key.
pub fn normalize(s: &str) -> String {
    significant(s).collect()
}

/// Order two names by their canonical forms without allocating.
pub fn compare(a: &str, b: &str) -> Ordering {
    significant(a).cmp(significant(b))
}

pub fn matches(a: &str, b: &str) -> bool {
    compare(a, b) == Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_case_spaces_and_underscores() {
        assert_eq!(compare("Rocket Launcher", "ROCKET_LAUNCHER"), Ordering::Equal);
        assert!(matches("spawn_health", "SPAWNHEALTH"));
        assert!(matches(" imp ", "IMP"));
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["Rocket Launcher", "ROCKET_LAUNCHER", "a_b c_d", "", "__", "Imp:3001"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn compare_agrees_with_normalize() {
        let pairs = [("ab", "AC"), ("b", "a_a"), ("x y", "XY"), ("", "_")];
        for (a, b) in pairs {
            assert_eq!(compare(a, b), normalize(a).cmp(&normalize(b)));
        }
    }

    #[test]
    fn distinct_names_differ() {
        assert!(!matches("IMP", "IMPS"));
        assert_eq!(compare("IMP", "IMPS"), Ordering::Less);
    }
}
