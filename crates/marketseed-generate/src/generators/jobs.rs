use chrono::NaiveDateTime;
use fake::Fake;
use fake::faker::job::en::Title;
use rand::Rng;
use uuid::Uuid;

use marketseed_core::{Category, IdPool, Job, JobKey};

use crate::errors::GenerationError;
use crate::generators::new_id;
use crate::generators::text::{text, word};

const DESCRIPTION_MAX_CHARS: usize = 50;

/// Job in a uniformly chosen category.
pub fn build_job<R: Rng + ?Sized>(
    rng: &mut R,
    now: NaiveDateTime,
    categories: &IdPool<Category>,
) -> Result<Job, GenerationError> {
    let id = new_id(rng);
    let category_id = categories.pick(rng)?;

    Ok(Job {
        id,
        created_at: now,
        updated_at: now,
        description: text(rng, DESCRIPTION_MAX_CHARS),
        image_id: None,
        name: Title().fake_with_rng(rng),
        category_id,
    })
}

/// Between 1 and `max_keys` (inclusive) keywords for `job_id`. Duplicates are allowed.
pub fn build_job_keys<R: Rng + ?Sized>(rng: &mut R, job_id: Uuid, max_keys: u32) -> Vec<JobKey> {
    let count = rng.random_range(1..=max_keys.max(1));
    (0..count)
        .map(|_| JobKey {
            job_id,
            key: word(rng),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::generators::now;

    #[test]
    fn job_keys_stay_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let job_id = Uuid::new_v4();
        let mut sizes = std::collections::BTreeSet::new();
        for _ in 0..300 {
            let keys = build_job_keys(&mut rng, job_id, 3);
            assert!((1..=3).contains(&keys.len()));
            assert!(keys.iter().all(|key| key.job_id == job_id));
            sizes.insert(keys.len());
        }
        assert_eq!(sizes.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn single_key_when_max_is_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..20 {
            assert_eq!(build_job_keys(&mut rng, Uuid::nil(), 1).len(), 1);
        }
    }

    #[test]
    fn job_requires_a_category() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let empty = IdPool::<Category>::new();
        assert!(build_job(&mut rng, now(), &empty).is_err());

        let categories: IdPool<Category> = [Uuid::new_v4()].into_iter().collect();
        let job = build_job(&mut rng, now(), &categories).expect("job");
        assert_eq!(job.category_id, categories.as_slice()[0]);
    }
}
