use serde::Serialize;

use crate::models::order::Price;

// A single product line inside a (client, date) group, with quantity and
// price already parsed out of their textual form.
#[derive(Debug, Clone, Serialize)]
pub struct LineItem {
    pub product: String,
    pub quantity: i64,
    pub price: Price,
}

// One client's receipt for a given date: their line items plus the group
// total (which goes Unknown as soon as any line is unpriced).
#[derive(Debug, Serialize)]
pub struct ClientReceipt {
    pub client: String,
    pub items: Vec<LineItem>,
    pub total: Price,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateDetail {
    pub date: String,
    pub clients: Vec<ClientReceipt>,
    pub grand_total: Price,
}

#[derive(Debug, Serialize)]
pub struct DateSummary {
    pub date: String,
    pub total: Price,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub month_total: f64,
    pub week_total: f64,
}
