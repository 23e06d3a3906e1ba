use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::models::{
    parse_price, parse_quantity, ClientReceipt, DashboardSummary, DateDetail, LineItem, Order,
    Price,
};

/// Group a snapshot of orders into (client, date) buckets of parsed line
/// items. Keys are compared by exact string match: client names differing
/// only in whitespace or case form distinct groups.
pub fn group_by_client_and_date(orders: &[Order]) -> BTreeMap<(String, String), Vec<LineItem>> {
    let mut groups: BTreeMap<(String, String), Vec<LineItem>> = BTreeMap::new();
    for order in orders {
        groups
            .entry((order.client.clone(), order.date.clone()))
            .or_default()
            .push(LineItem {
                product: order.product.clone(),
                quantity: parse_quantity(&order.quantity),
                price: parse_price(&order.price),
            });
    }
    groups
}

/// Total for one group of line items: sum of `quantity × price`. A single
/// unknown price makes the whole total unknown.
pub fn client_total(items: &[LineItem]) -> Price {
    let mut total = 0.0;
    for item in items {
        match item.price {
            Price::Known(price) => total += price * item.quantity as f64,
            Price::Unknown => return Price::Unknown,
        }
    }
    Price::Known(total)
}

/// Roll group totals up one level, with the same poisoning rule: any unknown
/// group total makes the grand total unknown.
pub fn grand_total<I>(totals: I) -> Price
where
    I: IntoIterator<Item = Price>,
{
    let mut sum = 0.0;
    for total in totals {
        match total {
            Price::Known(value) => sum += value,
            Price::Unknown => return Price::Unknown,
        }
    }
    Price::Known(sum)
}

/// One total per distinct date across all clients, unknown-poisoned the same
/// way as the per-client totals.
pub fn date_index(orders: &[Order]) -> BTreeMap<String, Price> {
    let mut index: BTreeMap<String, Price> = BTreeMap::new();
    for order in orders {
        let value = match parse_price(&order.price) {
            Price::Known(price) => Price::Known(price * parse_quantity(&order.quantity) as f64),
            Price::Unknown => Price::Unknown,
        };
        index
            .entry(order.date.clone())
            .and_modify(|total| {
                *total = match (*total, value) {
                    (Price::Known(a), Price::Known(b)) => Price::Known(a + b),
                    _ => Price::Unknown,
                }
            })
            .or_insert(value);
    }
    index
}

/// The receipt view for one date: every client that ordered that day, their
/// line items and totals, and the grand total across clients.
pub fn date_detail(orders: &[Order], date: &str) -> DateDetail {
    let mut clients = Vec::new();
    for ((client, group_date), items) in group_by_client_and_date(orders) {
        if group_date != date {
            continue;
        }
        let total = client_total(&items);
        clients.push(ClientReceipt {
            client,
            items,
            total,
        });
    }

    let overall = grand_total(clients.iter().map(|c| c.total));
    DateDetail {
        date: date.to_string(),
        clients,
        grand_total: overall,
    }
}

/// Month-to-date and trailing-week dashboard figures.
///
/// `month_total` covers orders in the same calendar month and year as `now`;
/// `week_total` covers orders dated within the trailing 7×24 hours, with no
/// lower bound on future dates. Unlike the receipt totals, an unknown price
/// contributes 0 here instead of poisoning the figure, and orders with
/// unparseable dates are skipped.
pub fn rollups(orders: &[Order], now: DateTime<Utc>) -> DashboardSummary {
    let mut month_total = 0.0;
    let mut week_total = 0.0;

    for order in orders {
        let Ok(date) = NaiveDate::parse_from_str(&order.date, "%Y-%m-%d") else {
            continue;
        };
        let value = order_value(order);

        if date.month() == now.month() && date.year() == now.year() {
            month_total += value;
        }

        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        if now - midnight <= Duration::days(7) {
            week_total += value;
        }
    }

    DashboardSummary {
        month_total,
        week_total,
    }
}

/// Dashboard value of a single order: `quantity × price`, 0 when unpriced.
fn order_value(order: &Order) -> f64 {
    match parse_price(&order.price) {
        Price::Known(price) => price * parse_quantity(&order.quantity) as f64,
        Price::Unknown => 0.0,
    }
}
