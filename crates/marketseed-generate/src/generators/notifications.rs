use chrono::NaiveDateTime;
use rand::Rng;

use marketseed_core::{IdPool, Notification, Offer, User};

use crate::errors::GenerationError;
use crate::generators::new_id;
use crate::generators::text::sentence;

const MESSAGE_WORDS: usize = 8;

pub fn build_notification<R: Rng + ?Sized>(
    rng: &mut R,
    now: NaiveDateTime,
    offers: &IdPool<Offer>,
    users: &IdPool<User>,
) -> Result<Notification, GenerationError> {
    Ok(Notification {
        id: new_id(rng),
        created_at: now,
        message: sentence(rng, MESSAGE_WORDS),
        offer_id: offers.pick(rng)?,
        user_id: users.pick(rng)?,
    })
}
