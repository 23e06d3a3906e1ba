mod order;
mod summary;

pub use order::{
    parse_price, parse_quantity, DeleteOrderRequest, InsertResponse, MutationResponse, Order,
    OrderDraft, OrderKey, OrderPatch, Price, UpdateOrderRequest, UNPRICED,
};
pub use summary::{ClientReceipt, DashboardSummary, DateDetail, DateSummary, LineItem};
