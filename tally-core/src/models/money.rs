use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive as _, ToPrimitive as _},
};
use thiserror::Error;

/// An exact monetary amount, precise to the cent.
///
/// Receipt totals and item prices participate in divisibility rules
/// (whole-dollar, multiple-of-0.25), so they must be held as exact decimals:
/// binary floating point would make `35.10 % 0.25` land on either side of
/// zero depending on representation error. The inner [`Decimal`] is
/// validated on construction to be non-negative with at most two decimal
/// places.
///
/// On the wire, an amount is accepted either as a JSON string (`"35.35"`)
/// or as a JSON number (`35.35`), and always serialized as a two-decimal
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "MoneyDto", into = "String")
)]
pub struct Money(Decimal);

impl Money {
    /// The underlying decimal amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// True if the amount has no fractional cents, e.g. `9.00`.
    pub fn is_whole_dollars(&self) -> bool {
        self.0.is_integer()
    }

    /// True if the amount is an exact multiple of 0.25.
    pub fn is_quarter_multiple(&self) -> bool {
        (self.0 % Decimal::new(25, 2)).is_zero()
    }

    /// One fifth of the amount, rounded up to the next whole number.
    ///
    /// This is the per-item contribution of the description-length rule.
    /// Saturates at `u64::MAX`; amounts are capped at two decimal places
    /// but not bounded above.
    pub fn fifth_rounded_up(&self) -> u64 {
        (self.0 * Decimal::new(2, 1))
            .ceil()
            .to_u64()
            .unwrap_or(u64::MAX)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::Negative(value));
        }
        if value.normalize().scale() > 2 {
            return Err(MoneyError::SubCent(value));
        }
        Ok(Self(value))
    }
}

impl std::str::FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Decimal = s.parse().map_err(|_| MoneyError::Unparseable(s.to_owned()))?;
        value.try_into()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Money> for String {
    fn from(value: Money) -> Self {
        value.to_string()
    }
}

/// The ways a submitted amount can be invalid.
#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    /// The text did not parse as a decimal number at all
    #[error("not a decimal amount: {0:?}")]
    Unparseable(String),
    /// Monetary amounts on a receipt are never negative
    #[error("negative amount: {0}")]
    Negative(Decimal),
    /// Amounts are exact to the cent; finer precision is rejected
    #[error("amount has sub-cent precision: {0}")]
    SubCent(Decimal),
    /// A JSON number that has no decimal representation (NaN, infinity)
    #[error("amount is not a finite number")]
    NotFinite,
}

/// The wire format for an amount: a string or a bare JSON number.
///
/// The bare-number form converts through `f64`. Any amount that is exact to
/// the cent survives that conversion, and anything that does not normalize
/// to at most two decimal places is rejected afterwards, so representation
/// error cannot leak into the divisibility rules.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(untagged))]
pub enum MoneyDto {
    /// `"35.35"`
    Text(String),
    /// `35.35`
    Number(f64),
}

impl TryFrom<MoneyDto> for Money {
    type Error = MoneyError;

    fn try_from(value: MoneyDto) -> Result<Self, Self::Error> {
        match value {
            MoneyDto::Text(text) => text.parse(),
            MoneyDto::Number(number) => Decimal::from_f64(number)
                .ok_or(MoneyError::NotFinite)?
                .try_into(),
        }
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for Money {
    fn inline_schema() -> bool {
        true
    }

    fn schema_name() -> std::borrow::Cow<'static, str> {
        "Money".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "pattern": r"^\d+\.\d{2}$",
        })
    }
}
