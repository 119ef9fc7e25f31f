use std::collections::HashSet;

use rand::Rng;

/// Fake draws tried before a candidate is disambiguated with a numeric suffix.
pub const MAX_UNIQUE_ATTEMPTS: u32 = 50;

/// Per-run uniqueness guard for fake values backing unique columns.
#[derive(Debug, Default)]
pub struct UniqueValues {
    seen: HashSet<String>,
}

impl UniqueValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Draw values from `make` until one has not been returned before.
    ///
    /// After [`MAX_UNIQUE_ATTEMPTS`] collisions the last draw gets a numeric
    /// suffix (before the `@` for emails), so large runs never stall on a
    /// small fake vocabulary.
    pub fn draw<R, F>(&mut self, rng: &mut R, mut make: F) -> String
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> String,
    {
        let mut candidate = make(rng);
        for _ in 1..MAX_UNIQUE_ATTEMPTS {
            if self.seen.insert(candidate.clone()) {
                return candidate;
            }
            candidate = make(rng);
        }

        let mut counter = self.seen.len();
        loop {
            let suffixed = with_suffix(&candidate, counter);
            if self.seen.insert(suffixed.clone()) {
                return suffixed;
            }
            counter += 1;
        }
    }
}

fn with_suffix(value: &str, counter: usize) -> String {
    match value.split_once('@') {
        Some((local, domain)) => format!("{local}{counter}@{domain}"),
        None => format!("{value}{counter}"),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn constant_source_is_disambiguated() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut emails = UniqueValues::new();
        let values: Vec<String> = (0..5)
            .map(|_| emails.draw(&mut rng, |_| "same@example.com".to_string()))
            .collect();

        assert_eq!(values[0], "same@example.com");
        let distinct: HashSet<&String> = values.iter().collect();
        assert_eq!(distinct.len(), 5);
        for value in &values[1..] {
            assert!(value.starts_with("same"));
            assert!(value.ends_with("@example.com"));
        }
    }

    #[test]
    fn plain_values_get_trailing_suffix() {
        assert_eq!(with_suffix("jdoe", 7), "jdoe7");
        assert_eq!(with_suffix("j@x.org", 3), "j3@x.org");
    }
}
