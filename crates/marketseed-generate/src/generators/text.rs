use fake::Fake;
use fake::faker::lorem::en::{Sentence, Word};
use rand::Rng;

pub fn word<R: Rng + ?Sized>(rng: &mut R) -> String {
    Word().fake_with_rng(rng)
}

/// Sentence of exactly `words` words.
pub fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    Sentence(words..words + 1).fake_with_rng(rng)
}

/// Lorem sentences joined up to `max_chars` characters.
///
/// When not even one sentence fits, the first sentence is cut to the limit.
pub fn text<R: Rng + ?Sized>(rng: &mut R, max_chars: usize) -> String {
    let mut out = String::new();
    let mut len = 0;

    loop {
        let next: String = Sentence(3..10).fake_with_rng(rng);
        let next_len = next.chars().count();
        let needed = if out.is_empty() {
            next_len
        } else {
            len + 1 + next_len
        };

        if needed > max_chars {
            if out.is_empty() {
                return next.chars().take(max_chars).collect::<String>().trim_end().to_string();
            }
            return out;
        }

        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&next);
        len = needed;
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn text_respects_limit() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for max in [5, 25, 50, 100] {
            for _ in 0..50 {
                let value = text(&mut rng, max);
                assert!(value.chars().count() <= max, "{value:?} longer than {max}");
                assert!(!value.is_empty());
            }
        }
    }

    #[test]
    fn sentence_has_requested_words() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let value = sentence(&mut rng, 8);
        assert_eq!(value.split_whitespace().count(), 8);
    }
}
