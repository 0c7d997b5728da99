//! Prefix tokenizer for command arguments.
//!
//! A prefix is recognized only at the start of the argument string or right
//! after whitespace, so `abc/` inside a value is not split.

pub const PREFIX_NAME: &str = "n/";
pub const PREFIX_PHONE: &str = "p/";
pub const PREFIX_EMAIL: &str = "e/";
pub const PREFIX_CATEGORY: &str = "c/";
pub const PREFIX_NOTE: &str = "no/";
pub const PREFIX_TAG: &str = "t/";

/// Tokenized arguments: free text before the first prefix plus prefixed
/// values in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMap {
    preamble: String,
    values: Vec<(&'static str, String)>,
}

impl ArgumentMap {
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(candidate, _)| *candidate == prefix)
            .map(|(_, value)| value.as_str())
    }

    /// Every value given for `prefix`, in input order.
    pub fn all_values(&self, prefix: &str) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(candidate, _)| *candidate == prefix)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    pub fn has(&self, prefix: &str) -> bool {
        self.values.iter().any(|(candidate, _)| *candidate == prefix)
    }

    /// Prefixes from `single_valued` that were given more than once.
    ///
    /// The result follows the order in which each prefix first appeared in
    /// the input, with repeats removed.
    pub fn repeated(&self, single_valued: &[&'static str]) -> Vec<&'static str> {
        let mut repeated: Vec<&'static str> = Vec::new();
        for (prefix, _) in &self.values {
            if repeated.contains(prefix) || !single_valued.contains(prefix) {
                continue;
            }
            if self.all_values(prefix).len() > 1 {
                repeated.push(*prefix);
            }
        }
        repeated
    }
}

/// Splits `args` on the given prefixes.
pub fn tokenize(args: &str, prefixes: &[&'static str]) -> ArgumentMap {
    let mut positions: Vec<(usize, &'static str)> = Vec::new();
    for prefix in prefixes {
        for (offset, _) in args.match_indices(prefix) {
            let at_boundary = args[..offset]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace);
            if at_boundary {
                positions.push((offset, *prefix));
            }
        }
    }
    positions.sort_by_key(|(offset, _)| *offset);

    let preamble_end = positions.first().map_or(args.len(), |(offset, _)| *offset);
    let values = positions
        .iter()
        .enumerate()
        .map(|(slot, (offset, prefix))| {
            let start = offset + prefix.len();
            let end = positions
                .get(slot + 1)
                .map_or(args.len(), |(next_offset, _)| *next_offset);
            (*prefix, args[start..end].trim().to_string())
        })
        .collect();

    ArgumentMap {
        preamble: args[..preamble_end].trim().to_string(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::{tokenize, PREFIX_NAME, PREFIX_NOTE, PREFIX_PHONE, PREFIX_TAG};

    const ALL: &[&str] = &[PREFIX_NAME, PREFIX_PHONE, PREFIX_NOTE, PREFIX_TAG];

    #[test]
    fn splits_preamble_and_prefixed_values() {
        let map = tokenize(" 2 no/ likes tea  t/a t/b", ALL);
        assert_eq!(map.preamble(), "2");
        assert_eq!(map.value(PREFIX_NOTE), Some("likes tea"));
        assert_eq!(map.all_values(PREFIX_TAG), vec!["a", "b"]);
    }

    #[test]
    fn ignores_prefix_text_inside_a_word() {
        let map = tokenize(" n/Ann no/see abc/def", ALL);
        assert_eq!(map.value(PREFIX_NAME), Some("Ann"));
        assert_eq!(map.value(PREFIX_NOTE), Some("see abc/def"));
    }

    #[test]
    fn repeated_lists_each_prefix_once_in_first_appearance_order() {
        let map = tokenize(" p/1 t/x n/a p/2 t/y n/b n/c", ALL);
        assert_eq!(
            map.repeated(&[PREFIX_NAME, PREFIX_PHONE]),
            vec![PREFIX_PHONE, PREFIX_NAME]
        );
    }
}
