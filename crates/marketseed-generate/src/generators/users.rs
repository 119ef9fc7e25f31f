use chrono::NaiveDateTime;
use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, CountryName, PostCode, StreetName};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;

use marketseed_core::{AccountStatus, Role, User};

use crate::errors::GenerationError;
use crate::generators::new_id;
use crate::generators::password::FixtureHasher;
use crate::generators::text::text;
use crate::generators::unique::UniqueValues;

const ABOUT_ME_MAX_CHARS: usize = 100;

/// Builds users with unique emails and usernames.
///
/// Status is always ACTIVE and role always USER; the password column holds the
/// fixed-salt hash of the username (see [`crate::generators::password`]).
#[derive(Debug)]
pub struct UserFactory {
    hasher: FixtureHasher,
    emails: UniqueValues,
    usernames: UniqueValues,
}

impl UserFactory {
    pub fn new() -> Result<Self, GenerationError> {
        Ok(Self::with_hasher(FixtureHasher::fixture()?))
    }

    pub fn with_hasher(hasher: FixtureHasher) -> Self {
        Self {
            hasher,
            emails: UniqueValues::new(),
            usernames: UniqueValues::new(),
        }
    }

    pub fn build<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: NaiveDateTime,
    ) -> Result<User, GenerationError> {
        let id = new_id(rng);
        let email = self.emails.draw(rng, |rng| SafeEmail().fake_with_rng(rng));
        let username = self.usernames.draw(rng, |rng| Username().fake_with_rng(rng));
        let password_hash = self.hasher.hash(&username)?;

        let building: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);

        Ok(User {
            id,
            created_at: now,
            updated_at: now,
            status: AccountStatus::Active,
            email,
            password_hash,
            role: Role::User,
            about_me: text(rng, ABOUT_ME_MAX_CHARS),
            address: format!("{building} {street}"),
            city: CityName().fake_with_rng(rng),
            country: CountryName().fake_with_rng(rng),
            first_name: FirstName().fake_with_rng(rng),
            last_name: LastName().fake_with_rng(rng),
            phone_number: PhoneNumber().fake_with_rng(rng),
            postal_code: PostCode().fake_with_rng(rng),
            profile_picture: None,
            username,
        })
    }
}
