use super::pitch::Root;
use super::symbol::Theory;

/// Only the bare major and minor triads take slash-bass variants in
/// the generated vocabulary.
fn takes_slash_bass(suffix: &str) -> bool {
    suffix.is_empty() || suffix == "m"
}

impl Theory {
    /// Every chord name the grammar accepts in canonical form: the
    /// cross product of the 12 roots with the suffix vocabulary and,
    /// when `include_slash` is set, the slash-bass variants of the
    /// bare triads (bass never equal to the root).
    ///
    /// The result is deduplicated and lexicographically sorted.
    pub fn vocabulary(&self, include_slash: bool) -> Vec<String> {
        let mut names = Vec::new();
        for root in Root::ALL {
            for suffix in self.suffixes() {
                names.push(format!("{}{}", root, suffix));
                if include_slash && takes_slash_bass(suffix) {
                    for bass in Root::ALL {
                        if bass != root {
                            names.push(format!("{}{}/{}", root, suffix, bass));
                        }
                    }
                }
            }
        }
        names.sort();
        names.dedup();
        names
    }
}
