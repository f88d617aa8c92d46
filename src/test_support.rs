//! Shared fixtures: a small user-account dataset with a nested address,
//! standing in for an arbitrary backing collection.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;

use crate::query::Column;
use crate::record::{Field, FieldKind, FieldValue, Record, Schema};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Address {
    pub city: String,
    pub zip: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub nickname: Option<String>,
    pub active: bool,
    pub balance: f64,
    pub signed_up: DateTime<Utc>,
    pub address: Address,
}

static ADDRESS_SCHEMA: Lazy<Arc<Schema>> = Lazy::new(|| {
    Schema::builder("address")
        .field("city", FieldKind::Text)
        .field("zip", FieldKind::Text)
        .build()
});

static USER_ACCOUNT_SCHEMA: Lazy<Arc<Schema>> = Lazy::new(|| {
    Schema::builder("user_account")
        .field("id", FieldKind::Integer)
        .field("name", FieldKind::Text)
        .field("email", FieldKind::Text)
        .field("nickname", FieldKind::Text)
        .field("active", FieldKind::Boolean)
        .field("balance", FieldKind::Float)
        .field("signed_up", FieldKind::DateTime)
        .nested("address", ADDRESS_SCHEMA.clone())
        .build()
});

impl Record for Address {
    fn schema() -> Arc<Schema> {
        ADDRESS_SCHEMA.clone()
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "city" => Some(Field::Value(self.city.as_str().into())),
            "zip" => Some(Field::Value(self.zip.as_str().into())),
            _ => None,
        }
    }
}

impl Record for UserAccount {
    fn schema() -> Arc<Schema> {
        USER_ACCOUNT_SCHEMA.clone()
    }

    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "id" => Some(Field::Value(self.id.into())),
            "name" => Some(Field::Value(self.name.as_str().into())),
            "email" => Some(Field::Value(self.email.as_str().into())),
            "nickname" => Some(Field::Value(FieldValue::from(self.nickname.clone()))),
            "active" => Some(Field::Value(self.active.into())),
            "balance" => Some(Field::Value(self.balance.into())),
            "signed_up" => Some(Field::Value(self.signed_up.into())),
            "address" => Some(Field::Nested(&self.address)),
            _ => None,
        }
    }
}

fn account(
    id: i64,
    name: &str,
    nickname: Option<&str>,
    active: bool,
    balance: f64,
    year: i32,
    city: &str,
) -> UserAccount {
    UserAccount {
        id,
        name: name.to_string(),
        email: format!("{}@test.com", name.to_lowercase()),
        nickname: nickname.map(str::to_string),
        active,
        balance,
        signed_up: Utc.with_ymd_and_hms(year, 6, 1, 9, 0, 0).unwrap(),
        address: Address { city: city.to_string(), zip: format!("1{id:04}") },
    }
}

/// Five accounts in insertion order: Amie, Anna, Amanda, Baron, Jacky.
#[must_use]
pub fn sample_accounts() -> Vec<UserAccount> {
    vec![
        account(1, "Amie", None, true, 120.0, 2020, "Jakarta"),
        account(2, "Anna", Some(""), false, 80.5, 2021, "Bandung"),
        account(3, "Amanda", Some("Mandy"), true, 310.25, 2019, "Surabaya"),
        account(4, "Baron", Some("Bear"), false, 42.0, 2022, "Jakarta"),
        account(5, "Jacky", Some("Jack"), true, 199.99, 2023, "Medan"),
    ]
}

/// A searchable (but not sortable) column over the given field path.
#[must_use]
pub fn searchable_column(name: &str) -> Column {
    Column { data: name.to_string(), name: name.to_string(), searchable: true, ..Column::default() }
}

/// A sortable (but not searchable) column over the given field path.
#[must_use]
pub fn sortable_column(name: &str) -> Column {
    Column { data: name.to_string(), name: name.to_string(), sortable: true, ..Column::default() }
}
