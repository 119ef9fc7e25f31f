use crate::model::FieldValue;

/// Static description of a seeded table: its name and insert column order.
#[derive(Debug, PartialEq, Eq)]
pub struct TableSpec {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSpec {
    /// Position of `column` in the insert column list.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| *name == column)
    }
}

/// A row that can be flushed to a sink.
///
/// `values` must yield one value per entry of `TABLE.columns`, in order.
pub trait Row {
    const TABLE: &'static TableSpec;

    fn values(&self) -> Vec<FieldValue>;
}

pub const USERS: TableSpec = TableSpec {
    name: "users",
    columns: &[
        "id",
        "creation_timestamp",
        "update_timestamp",
        "active",
        "email",
        "password",
        "role",
        "about_me",
        "address",
        "city",
        "country",
        "first_name",
        "last_name",
        "phone_number",
        "postal_code",
        "profile_picture",
        "username",
    ],
};

pub const CATEGORIES: TableSpec = TableSpec {
    name: "categories",
    columns: &[
        "id",
        "creation_timestamp",
        "update_timestamp",
        "description",
        "image_id",
        "name",
    ],
};

pub const JOBS: TableSpec = TableSpec {
    name: "jobs",
    columns: &[
        "id",
        "creation_timestamp",
        "update_timestamp",
        "description",
        "image_id",
        "name",
        "category_id",
    ],
};

pub const JOB_KEYS: TableSpec = TableSpec {
    name: "job_keys",
    columns: &["job_id", "key"],
};

pub const ADVERTS: TableSpec = TableSpec {
    name: "adverts",
    columns: &[
        "id",
        "creation_timestamp",
        "update_timestamp",
        "advertiser",
        "delivery_time",
        "description",
        "image_id",
        "name",
        "price",
        "status",
        "user_id",
        "job_id",
    ],
};

pub const OFFERS: TableSpec = TableSpec {
    name: "offers",
    columns: &[
        "id",
        "creation_timestamp",
        "update_timestamp",
        "offered_price",
        "status",
        "user_id",
        "advert_id",
    ],
};

pub const NOTIFICATIONS: TableSpec = TableSpec {
    name: "notifications",
    columns: &["id", "creation_timestamp", "message", "offer_id", "user_id"],
};

/// Tables in the order they are seeded. Children always follow their parents.
pub const SEED_ORDER: &[&TableSpec] = &[
    &USERS,
    &CATEGORIES,
    &JOBS,
    &JOB_KEYS,
    &ADVERTS,
    &OFFERS,
    &NOTIFICATIONS,
];

#[cfg(test)]
mod tests {
    use super::*;

    fn position(table: &TableSpec) -> usize {
        SEED_ORDER
            .iter()
            .position(|spec| spec.name == table.name)
            .unwrap_or(usize::MAX)
    }

    #[test]
    fn seed_order_places_parents_first() {
        let edges: &[(&TableSpec, &TableSpec)] = &[
            (&CATEGORIES, &JOBS),
            (&JOBS, &JOB_KEYS),
            (&USERS, &ADVERTS),
            (&JOBS, &ADVERTS),
            (&USERS, &OFFERS),
            (&ADVERTS, &OFFERS),
            (&OFFERS, &NOTIFICATIONS),
            (&USERS, &NOTIFICATIONS),
        ];
        for (parent, child) in edges {
            assert!(
                position(parent) < position(child),
                "{} must be seeded before {}",
                parent.name,
                child.name
            );
        }
    }

    #[test]
    fn column_index_finds_foreign_keys() {
        assert_eq!(JOBS.column_index("category_id"), Some(6));
        assert_eq!(JOB_KEYS.column_index("key"), Some(1));
        assert_eq!(OFFERS.column_index("missing"), None);
    }
}
