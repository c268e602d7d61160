//! The strongly-typed receipt identifier.
//!
//! A newtype over [`uuid::Uuid`] so an id can't be confused with any other
//! string floating through the system. Stored in SQLite as its canonical
//! hyphenated text form, which is also how it appears in URLs and JSON.

/// Unique identifier for a stored receipt, derived from payload content
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct ReceiptId(pub uuid::Uuid);

impl From<uuid::Uuid> for ReceiptId {
    fn from(value: uuid::Uuid) -> Self {
        Self(value)
    }
}

impl From<ReceiptId> for uuid::Uuid {
    fn from(value: ReceiptId) -> Self {
        value.0
    }
}

impl std::fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ReceiptId {
    type Err = <uuid::Uuid as std::str::FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl sqlx::Type<sqlx::Sqlite> for ReceiptId {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for ReceiptId {
    fn encode_by_ref(
        &self,
        args: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        sqlx::Encode::<'q, sqlx::Sqlite>::encode_by_ref(&self.0.to_string(), args)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for ReceiptId {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let string = <&str as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
        let value = string.parse()?;
        Ok(value)
    }
}
