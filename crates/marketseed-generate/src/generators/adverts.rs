use chrono::NaiveDateTime;
use fake::Fake;
use fake::faker::company::en::CatchPhrase;
use rand::Rng;

use marketseed_core::{Advert, AdvertStatus, Advertiser, IdPool, Job, User};

use crate::errors::GenerationError;
use crate::generators::text::text;
use crate::generators::{DELIVERY_DAYS, PRICE_RANGE, new_id, pick_variant};

const DESCRIPTION_MAX_CHARS: usize = 100;

/// Advert posted by a random user for a random job.
pub fn build_advert<R: Rng + ?Sized>(
    rng: &mut R,
    now: NaiveDateTime,
    users: &IdPool<User>,
    jobs: &IdPool<Job>,
) -> Result<Advert, GenerationError> {
    Ok(Advert {
        id: new_id(rng),
        created_at: now,
        updated_at: now,
        advertiser: pick_variant(Advertiser::ALL, rng),
        delivery_time: rng.random_range(DELIVERY_DAYS),
        description: text(rng, DESCRIPTION_MAX_CHARS),
        image_id: None,
        name: CatchPhrase().fake_with_rng(rng),
        price: rng.random_range(PRICE_RANGE),
        status: pick_variant(AdvertStatus::ALL, rng),
        user_id: users.pick(rng)?,
        job_id: jobs.pick(rng)?,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use uuid::Uuid;

    use super::*;
    use crate::generators::now;

    #[test]
    fn adverts_stay_in_declared_sets_and_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let users: IdPool<User> = (0..3).map(|_| Uuid::new_v4()).collect();
        let jobs: IdPool<Job> = (0..3).map(|_| Uuid::new_v4()).collect();

        for _ in 0..200 {
            let advert = build_advert(&mut rng, now(), &users, &jobs).expect("advert");
            assert!(DELIVERY_DAYS.contains(&advert.delivery_time));
            assert!(PRICE_RANGE.contains(&advert.price));
            assert!(Advertiser::ALL.contains(&advert.advertiser));
            assert!(AdvertStatus::ALL.contains(&advert.status));
            assert!(users.as_slice().contains(&advert.user_id));
            assert!(jobs.as_slice().contains(&advert.job_id));
        }
    }
}
