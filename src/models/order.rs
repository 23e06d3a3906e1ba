use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

/// Sentinel stored in the `price` field when the price is not yet known.
pub const UNPRICED: &str = "N/A";

// Represents a single purchase line: one product bought by one client on one
// business date. Quantity and price are kept textual so the "N/A" sentinel and
// user-entered formatting survive storage round trips unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub client: String,
    pub product: String,
    pub quantity: String,
    pub price: String,
    pub date: String,
}

// An order as submitted by the creation form, before merging and defaulting.
// Missing fields deserialize to empty strings and are caught by validation.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub date: String,
}

/// The business identity key used to address update and delete. Matching is
/// exact string equality: case-sensitive, no trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderKey {
    pub client: String,
    pub product: String,
    pub date: String,
}

/// Partial update applied to every order matching an [`OrderKey`]. Only the
/// fields that are present are written.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub quantity: Option<String>,
    pub price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub date: String,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteOrderRequest {
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub message: String,
    pub inserted_count: u64,
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
}

/// A price once it has crossed the model boundary: either a known numeric
/// value or the explicit "unpriced" state. The textual representation only
/// exists at the persistence edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Price {
    Known(f64),
    Unknown,
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Price::Known(value) => serializer.serialize_f64(*value),
            Price::Unknown => serializer.serialize_str(UNPRICED),
        }
    }
}

/// Parse a stored price string. The sentinel token and anything that fails to
/// parse degrade to [`Price::Unknown`]; currency symbols and thousands
/// separators are stripped first.
pub fn parse_price(text: &str) -> Price {
    if text == UNPRICED {
        return Price::Unknown;
    }
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(value) => Price::Known(value),
        Err(_) => Price::Unknown,
    }
}

/// Parse a stored quantity string. Anything that is not a plain integer
/// counts as 0, so a bad quantity becomes a no-op line item rather than an
/// error.
pub fn parse_quantity(text: &str) -> i64 {
    text.trim().parse::<i64>().unwrap_or(0)
}
