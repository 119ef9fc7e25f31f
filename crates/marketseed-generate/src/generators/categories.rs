use chrono::NaiveDateTime;
use rand::Rng;

use marketseed_core::Category;

use crate::generators::new_id;
use crate::generators::text::{text, word};

const DESCRIPTION_MAX_CHARS: usize = 50;

pub fn build_category<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime) -> Category {
    Category {
        id: new_id(rng),
        created_at: now,
        updated_at: now,
        description: text(rng, DESCRIPTION_MAX_CHARS),
        image_id: None,
        name: word(rng),
    }
}
