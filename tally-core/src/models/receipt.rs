use super::money::Money;
use thiserror::Error;
use time::{format_description::BorrowedFormatItem, macros::format_description};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// A validated purchase record.
///
/// A `Receipt` only ever comes into existence through [`ReceiptDto`], which
/// enforces the structural invariants (non-empty retailer, at least one
/// item) that the scoring engine is allowed to assume. The field types carry
/// their own invariants: [`Money`] amounts are exact decimals, and the
/// date/time wrappers hold the calendar values parsed from their wire form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ReceiptDto", into = "ReceiptDto")
)]
pub struct Receipt {
    /// The store name as printed on the receipt
    pub retailer: String,
    /// The calendar date of the purchase
    pub purchase_date: PurchaseDate,
    /// The time of the purchase, minute precision
    pub purchase_time: PurchaseTime,
    /// The purchased items, in receipt order
    pub items: Vec<Item>,
    /// The receipt total
    pub total: Money,
}

/// A single line item on a receipt.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Item {
    /// The product description, kept exactly as submitted
    /// (the scoring rules trim it themselves)
    pub short_description: String,
    /// The price of this item
    pub price: Money,
}

/// The purchase date, `YYYY-MM-DD` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct PurchaseDate(time::Date);

impl std::ops::Deref for PurchaseDate {
    type Target = time::Date;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<time::Date> for PurchaseDate {
    fn from(value: time::Date) -> Self {
        Self(value)
    }
}

impl TryFrom<String> for PurchaseDate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(Self(time::Date::parse(&value, DATE_FORMAT)?))
    }
}

impl std::fmt::Display for PurchaseDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT).unwrap())
    }
}

impl From<PurchaseDate> for String {
    fn from(value: PurchaseDate) -> Self {
        value.to_string()
    }
}

/// The purchase time, 24-hour `HH:MM` on the wire.
///
/// Minute precision is part of the data model: a payload carrying seconds
/// (`"14:33:00"`) or a 12-hour clock (`"2:33 pm"`) is rejected rather than
/// coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct PurchaseTime(time::Time);

impl std::ops::Deref for PurchaseTime {
    type Target = time::Time;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<time::Time> for PurchaseTime {
    fn from(value: time::Time) -> Self {
        // truncate to the minute; seconds are not representable on the wire
        Self(value.replace_second(0).unwrap_or(value))
    }
}

impl TryFrom<String> for PurchaseTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let invalid = || ValidationError::Time(value.clone());
        let (hour, minute) = value.split_once(':').ok_or_else(invalid)?;
        if hour.len() != 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        let time = time::Time::from_hms(hour, minute, 0).map_err(|_| invalid())?;
        Ok(Self(time))
    }
}

impl std::fmt::Display for PurchaseTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl From<PurchaseTime> for String {
    fn from(value: PurchaseTime) -> Self {
        value.to_string()
    }
}

/// The ways a submitted receipt can be structurally invalid.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Error when the retailer name is empty
    #[error("retailer must be non-empty")]
    EmptyRetailer,
    /// Error when the receipt has no items at all
    #[error("a receipt must contain at least one item")]
    NoItems,
    /// Error when the purchase date is not a valid `YYYY-MM-DD` date
    #[error("invalid purchase date: {0}")]
    Date(#[from] time::error::Parse),
    /// Error when the purchase time is not a valid 24-hour `HH:MM` time
    #[error("invalid purchase time {0:?}: expected 24-hour HH:MM")]
    Time(String),
}

/// The "DTO" type for a receipt.
///
/// This struct mirrors the raw payload accepted in API requests. Converting
/// it into a [`Receipt`] enforces the structural invariants; the conversion
/// is the single validation gate between the outside world and the scoring
/// engine.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct ReceiptDto {
    /// The store name
    pub retailer: String,
    /// `YYYY-MM-DD`
    pub purchase_date: PurchaseDate,
    /// 24-hour `HH:MM`
    pub purchase_time: PurchaseTime,
    /// At least one item
    pub items: Vec<Item>,
    /// The receipt total
    pub total: Money,
}

impl TryFrom<ReceiptDto> for Receipt {
    type Error = ValidationError;

    fn try_from(value: ReceiptDto) -> Result<Self, Self::Error> {
        if value.retailer.is_empty() {
            return Err(ValidationError::EmptyRetailer);
        }
        if value.items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        Ok(Self {
            retailer: value.retailer,
            purchase_date: value.purchase_date,
            purchase_time: value.purchase_time,
            items: value.items,
            total: value.total,
        })
    }
}

impl From<Receipt> for ReceiptDto {
    fn from(value: Receipt) -> Self {
        Self {
            retailer: value.retailer,
            purchase_date: value.purchase_date,
            purchase_time: value.purchase_time,
            items: value.items,
            total: value.total,
        }
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Receipt {
    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Receipt".into()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        ReceiptDto::json_schema(generator)
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for PurchaseDate {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "PurchaseDate".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "format": "date",
        })
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for PurchaseTime {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "PurchaseTime".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "pattern": r"^\d{2}:\d{2}$",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> &'static str {
        r#"{
            "retailer": "Target",
            "purchaseDate": "2022-01-02",
            "purchaseTime": "13:13",
            "items": [{"shortDescription": "Pepsi - 12-oz", "price": "1.25"}],
            "total": "1.25"
        }"#
    }

    #[test]
    fn test_parse_wire_payload() {
        let receipt: Receipt = serde_json::from_str(payload()).unwrap();
        assert_eq!(receipt.retailer, "Target");
        assert_eq!(receipt.purchase_date.day(), 2);
        assert_eq!(receipt.purchase_time.to_string(), "13:13");
        assert_eq!(receipt.items.len(), 1);
        assert_eq!(receipt.items[0].short_description, "Pepsi - 12-oz");
    }

    #[test]
    fn test_serializes_camel_case() {
        let receipt: Receipt = serde_json::from_str(payload()).unwrap();
        let value = serde_json::to_value(&receipt).unwrap();
        assert_eq!(value["purchaseDate"], "2022-01-02");
        assert_eq!(value["purchaseTime"], "13:13");
        assert_eq!(value["items"][0]["shortDescription"], "Pepsi - 12-oz");
        assert_eq!(value["total"], "1.25");
    }

    #[test]
    fn test_rejects_empty_retailer_and_no_items() {
        let mut value: serde_json::Value = serde_json::from_str(payload()).unwrap();
        value["retailer"] = "".into();
        assert!(serde_json::from_value::<Receipt>(value).is_err());

        let mut value: serde_json::Value = serde_json::from_str(payload()).unwrap();
        value["items"] = serde_json::json!([]);
        assert!(serde_json::from_value::<Receipt>(value).is_err());
    }

    #[test]
    fn test_purchase_time_requires_minute_precision() {
        assert!(PurchaseTime::try_from("13:13".to_owned()).is_ok());
        assert!(PurchaseTime::try_from("13:13:00".to_owned()).is_err());
        assert!(PurchaseTime::try_from("1:13".to_owned()).is_err());
        assert!(PurchaseTime::try_from("25:00".to_owned()).is_err());
        assert!(PurchaseTime::try_from("2:33 pm".to_owned()).is_err());
    }

    #[test]
    fn test_purchase_date_round_trip() {
        let date = PurchaseDate::try_from("2022-04-01".to_owned()).unwrap();
        assert_eq!(date.to_string(), "2022-04-01");
        assert!(PurchaseDate::try_from("2022-13-01".to_owned()).is_err());
        assert!(PurchaseDate::try_from("04/01/2022".to_owned()).is_err());
    }
}
