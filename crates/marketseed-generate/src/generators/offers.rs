use chrono::NaiveDateTime;
use rand::Rng;

use marketseed_core::{Advert, IdPool, Offer, OfferStatus, User};

use crate::errors::GenerationError;
use crate::generators::{PRICE_RANGE, new_id, pick_variant};

pub fn build_offer<R: Rng + ?Sized>(
    rng: &mut R,
    now: NaiveDateTime,
    users: &IdPool<User>,
    adverts: &IdPool<Advert>,
) -> Result<Offer, GenerationError> {
    Ok(Offer {
        id: new_id(rng),
        created_at: now,
        updated_at: now,
        offered_price: rng.random_range(PRICE_RANGE),
        status: pick_variant(OfferStatus::ALL, rng),
        user_id: users.pick(rng)?,
        advert_id: adverts.pick(rng)?,
    })
}
