//! Order entry, listing and cancellation.

use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::error::CoinbaseError;
use crate::rest::endpoints::{private, segment};
use crate::rest::{CoinbaseRestClient, Method, Param, Params, Transport};
use crate::types::codec;
use crate::types::{
    CancelAfter, OrderType, SelfTradePrevention, Side, SortedBy, Sorting, StopOrderType,
    TimeInForce,
};

/// An order as reported by the exchange.
///
/// Pending orders carry a reduced set of fields, so most attributes are
/// optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    /// Exchange-assigned order ID.
    pub id: String,
    /// Product the order trades.
    pub product_id: String,
    /// Order side.
    pub side: Side,
    /// Order type.
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// `open`, `pending`, `rejected`, `done`, `active`, `received` or `all`.
    pub status: String,
    /// Creation time.
    #[serde(with = "codec::timestamp")]
    pub created_at: OffsetDateTime,
    /// Fees paid so far.
    #[serde(default, with = "codec::amount::option")]
    pub fill_fees: Option<Decimal>,
    /// Base amount filled so far.
    #[serde(default, with = "codec::amount::option")]
    pub filled_size: Option<Decimal>,
    /// Quote value filled so far.
    #[serde(default, with = "codec::amount::option")]
    pub executed_value: Option<Decimal>,
    /// Whether all fills have settled.
    #[serde(default)]
    pub settled: bool,
    /// Whether the order may only add liquidity.
    #[serde(default)]
    pub post_only: bool,
    /// Time in force.
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    /// Expiry of a GTT order.
    #[serde(default, with = "codec::timestamp::option")]
    pub expire_time: Option<OffsetDateTime>,
    /// Limit price.
    #[serde(default, with = "codec::amount::option")]
    pub price: Option<Decimal>,
    /// Base amount.
    #[serde(default, with = "codec::amount::option")]
    pub size: Option<Decimal>,
    /// Owning profile.
    #[serde(default)]
    pub profile_id: Option<String>,
    /// Quote amount of a market order, after holds.
    #[serde(default, with = "codec::amount::option")]
    pub funds: Option<Decimal>,
    /// Quote amount of a market order, as specified.
    #[serde(default, with = "codec::amount::option")]
    pub specified_funds: Option<Decimal>,
    /// Self-trade prevention mode.
    #[serde(default)]
    pub stp: Option<SelfTradePrevention>,
    /// When the order left the book.
    #[serde(default, with = "codec::timestamp::option")]
    pub done_at: Option<OffsetDateTime>,
    /// Why the order left the book.
    #[serde(default)]
    pub done_reason: Option<String>,
    /// Why the order was rejected.
    #[serde(default)]
    pub reject_reason: Option<String>,
    /// Stop direction.
    #[serde(default)]
    pub stop: Option<StopOrderType>,
    /// Stop trigger price.
    #[serde(default, with = "codec::amount::option")]
    pub stop_price: Option<Decimal>,
    /// Funding amount for margin orders.
    #[serde(default, with = "codec::amount::option")]
    pub funding_amount: Option<Decimal>,
    /// Client-assigned order ID.
    #[serde(default)]
    pub client_oid: Option<String>,
}

/// A new order to place with [`CoinbaseRestClient::create_order`].
///
/// # Example
///
/// ```rust
/// use rust_decimal::Decimal;
/// use coinbase_exchange_client::rest::orders::NewOrder;
/// use coinbase_exchange_client::types::{Side, TimeInForce};
///
/// let order = NewOrder::limit(Side::Buy, "BTC-USD", Decimal::new(10000, 0), Decimal::new(1, 2))
///     .time_in_force(TimeInForce::IOC)
///     .client_oid("my-order-1");
///
/// assert!(order.to_params().to_body().contains(r#""price":"10000""#));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Order side.
    pub side: Side,
    /// Product to trade.
    pub product_id: String,
    /// Order type.
    pub order_type: OrderType,
    /// Limit price.
    pub price: Option<Decimal>,
    /// Base amount.
    pub size: Option<Decimal>,
    /// Quote amount, for market buys.
    pub funds: Option<Decimal>,
    /// Profile to place the order on.
    pub profile_id: Option<String>,
    /// Self-trade prevention mode.
    pub stp: Option<SelfTradePrevention>,
    /// Stop direction.
    pub stop: Option<StopOrderType>,
    /// Stop trigger price.
    pub stop_price: Option<Decimal>,
    /// Time in force.
    pub time_in_force: Option<TimeInForce>,
    /// Lifetime of a GTT order.
    pub cancel_after: Option<CancelAfter>,
    /// Only add liquidity.
    pub post_only: Option<bool>,
    /// Client-assigned order ID.
    pub client_oid: Option<String>,
}

impl NewOrder {
    /// Create an order of `order_type` with no amounts set.
    pub fn new(side: Side, product_id: impl Into<String>, order_type: OrderType) -> Self {
        Self {
            side,
            product_id: product_id.into(),
            order_type,
            price: None,
            size: None,
            funds: None,
            profile_id: None,
            stp: None,
            stop: None,
            stop_price: None,
            time_in_force: None,
            cancel_after: None,
            post_only: None,
            client_oid: None,
        }
    }

    /// Limit order for `size` at `price`.
    pub fn limit(side: Side, product_id: impl Into<String>, price: Decimal, size: Decimal) -> Self {
        let mut order = Self::new(side, product_id, OrderType::Limit);
        order.price = Some(price);
        order.size = Some(size);
        order
    }

    /// Market order for a base amount.
    pub fn market(side: Side, product_id: impl Into<String>, size: Decimal) -> Self {
        let mut order = Self::new(side, product_id, OrderType::Market);
        order.size = Some(size);
        order
    }

    /// Market order spending a quote amount.
    pub fn market_funds(side: Side, product_id: impl Into<String>, funds: Decimal) -> Self {
        let mut order = Self::new(side, product_id, OrderType::Market);
        order.funds = Some(funds);
        order
    }

    /// Place on a specific profile.
    pub fn profile_id(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }

    /// Set the self-trade prevention mode.
    pub fn stp(mut self, stp: SelfTradePrevention) -> Self {
        self.stp = Some(stp);
        self
    }

    /// Turn into a stop order triggered at `stop_price`.
    pub fn stop(mut self, stop: StopOrderType, stop_price: Decimal) -> Self {
        self.stop = Some(stop);
        self.stop_price = Some(stop_price);
        self
    }

    /// Set time in force.
    pub fn time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    /// Good-till-time with the given lifetime.
    pub fn cancel_after(mut self, cancel_after: CancelAfter) -> Self {
        self.time_in_force = Some(TimeInForce::GTT);
        self.cancel_after = Some(cancel_after);
        self
    }

    /// Set as post-only order.
    pub fn post_only(mut self) -> Self {
        self.post_only = Some(true);
        self
    }

    /// Set the client order ID.
    pub fn client_oid(mut self, client_oid: impl Into<String>) -> Self {
        self.client_oid = Some(client_oid.into());
        self
    }

    /// Request parameters for this order.
    pub fn to_params(&self) -> Params {
        Params::new()
            .insert("profile_id", self.profile_id.clone())
            .insert("type", Param::converted(Some(self.order_type), codec::display_param))
            .insert("side", Param::converted(Some(self.side), codec::display_param))
            .insert("product_id", self.product_id.as_str())
            .insert("stp", Param::converted(self.stp, codec::display_param))
            .insert("stop", Param::converted(self.stop, codec::display_param))
            .insert("stop_price", Param::converted(self.stop_price, codec::amount_param))
            .insert("price", Param::converted(self.price, codec::amount_param))
            .insert("size", Param::converted(self.size, codec::amount_param))
            .insert("funds", Param::converted(self.funds, codec::amount_param))
            .insert("time_in_force", Param::converted(self.time_in_force, codec::display_param))
            .insert("cancel_after", Param::converted(self.cancel_after, codec::display_param))
            .insert("post_only", self.post_only)
            .insert("client_oid", self.client_oid.clone())
    }
}

/// Filters for [`CoinbaseRestClient::get_orders`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrdersRequest {
    /// Maximum number of results.
    pub limit: u32,
    /// Statuses to include; the exchange defaults to open and pending.
    pub status: Vec<String>,
    /// Only orders on this profile.
    pub profile_id: Option<String>,
    /// Only orders on this product.
    pub product_id: Option<String>,
    /// Sort key.
    pub sorted_by: Option<SortedBy>,
    /// Sort direction.
    pub sorting: Option<Sorting>,
    /// Earliest creation time.
    pub start_date: Option<OffsetDateTime>,
    /// Latest creation time.
    pub end_date: Option<OffsetDateTime>,
    /// Pagination cursor: newer than this.
    pub before: Option<OffsetDateTime>,
    /// Pagination cursor: older than this.
    pub after: Option<OffsetDateTime>,
}

impl Default for OrdersRequest {
    fn default() -> Self {
        Self {
            limit: 100,
            status: Vec::new(),
            profile_id: None,
            product_id: None,
            sorted_by: None,
            sorting: None,
            start_date: None,
            end_date: None,
            before: None,
            after: None,
        }
    }
}

impl OrdersRequest {
    /// Create a request with default filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the result limit.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Add a status to include.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status.push(status.into());
        self
    }

    /// Only orders on this product.
    pub fn product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Only orders on this profile.
    pub fn profile_id(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }

    /// Sort results.
    pub fn sort(mut self, sorted_by: SortedBy, sorting: Sorting) -> Self {
        self.sorted_by = Some(sorted_by);
        self.sorting = Some(sorting);
        self
    }

    /// Only orders created within `[start, end]`.
    pub fn date_range(mut self, start: OffsetDateTime, end: OffsetDateTime) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    fn to_params(&self) -> Result<Params, CoinbaseError> {
        let status = (!self.status.is_empty()).then(|| self.status.clone());
        Ok(Params::new()
            .insert("limit", self.limit)
            .insert("status", status)
            .insert("profile_id", self.profile_id.clone())
            .insert("product_id", self.product_id.clone())
            .insert("sorted_by", Param::converted(self.sorted_by, codec::display_param))
            .insert("sorting", Param::converted(self.sorting, codec::display_param))
            .insert("start_date", self.start_date.as_ref().map(codec::rfc3339_param).transpose()?)
            .insert("end_date", self.end_date.as_ref().map(codec::rfc3339_param).transpose()?)
            .insert("before", self.before.as_ref().map(codec::rfc3339_param).transpose()?)
            .insert("after", self.after.as_ref().map(codec::rfc3339_param).transpose()?))
    }
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// Get a single order.
    ///
    /// `order_id` is either the exchange ID or `client:<client_oid>`. A
    /// canceled order with no fills may be reported as not found.
    pub async fn get_order(&self, order_id: &str) -> Result<Order, CoinbaseError> {
        let path = format!("{}/{}", private::ORDERS, segment(order_id));
        self.dispatch(Method::Get, &path, None).await
    }

    /// List orders. Only open and unsettled orders are returned by default.
    pub async fn get_orders(&self, request: &OrdersRequest) -> Result<Vec<Order>, CoinbaseError> {
        let path = request.to_params()?.path_with_query(private::ORDERS)?;
        self.dispatch(Method::Get, &path, None).await
    }

    /// Cancel an open order. Returns the ID the order was canceled by.
    pub async fn cancel_order(
        &self,
        order_id: &str,
        profile_id: Option<&str>,
    ) -> Result<String, CoinbaseError> {
        let path = Params::new()
            .insert("profile_id", profile_id)
            .path_with_query(&format!("{}/{}", private::ORDERS, segment(order_id)))?;

        self.dispatch(Method::Delete, &path, None).await
    }

    /// Cancel all open orders, optionally on one profile or product.
    ///
    /// Best effort: the call may need repeating until nothing is left open.
    /// Returns the IDs of the canceled orders.
    pub async fn cancel_all_orders(
        &self,
        profile_id: Option<&str>,
        product_id: Option<&str>,
    ) -> Result<Vec<String>, CoinbaseError> {
        let path = Params::new()
            .insert("profile_id", profile_id)
            .insert("product_id", product_id)
            .path_with_query(private::ORDERS)?;

        self.dispatch(Method::Delete, &path, None).await
    }

    /// Place an order.
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, CoinbaseError> {
        let body = order.to_params().to_body();
        self.dispatch(Method::Post, private::ORDERS, Some(body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::mock::{MockTransport, mock_client};
    use std::str::FromStr;
    use time::macros::datetime;

    const PENDING_ORDER: &str = r#"{
        "id": "d0c5340b-6d6c-49d9-b567-48c4bfca13d2",
        "price": "0.10000000",
        "size": "0.01000000",
        "product_id": "BTC-USD",
        "side": "buy",
        "stp": "dc",
        "type": "limit",
        "time_in_force": "GTC",
        "post_only": false,
        "created_at": "2016-12-08T20:02:28.53864Z",
        "fill_fees": "0.0000000000000000",
        "filled_size": "0.00000000",
        "executed_value": "0.0000000000000000",
        "status": "pending",
        "settled": false
    }"#;

    #[test]
    fn test_new_order_params() {
        let order = NewOrder::limit(
            Side::Buy,
            "BTC-USD",
            Decimal::from_str("0.100").unwrap(),
            Decimal::from_str("0.01").unwrap(),
        )
        .client_oid("c1");

        assert_eq!(
            order.to_params().to_body(),
            r#"{"type":"limit","side":"buy","product_id":"BTC-USD","price":"0.100","size":"0.01","client_oid":"c1"}"#
        );
    }

    #[test]
    fn test_stop_gtt_order_params() {
        let order = NewOrder::limit(
            Side::Sell,
            "ETH-USD",
            Decimal::from_str("1500").unwrap(),
            Decimal::from_str("2").unwrap(),
        )
        .stop(StopOrderType::Loss, Decimal::from_str("1510").unwrap())
        .cancel_after(CancelAfter::Hour)
        .stp(SelfTradePrevention::CancelOldest)
        .post_only();

        let body: serde_json::Value = serde_json::from_str(&order.to_params().to_body()).unwrap();
        assert_eq!(body["stop"], "loss");
        assert_eq!(body["stop_price"], "1510");
        assert_eq!(body["time_in_force"], "GTT");
        assert_eq!(body["cancel_after"], "hour");
        assert_eq!(body["stp"], "co");
        assert_eq!(body["post_only"], true);
        assert!(body.get("funds").is_none());
    }

    #[tokio::test]
    async fn test_create_order() {
        let client = mock_client(MockTransport::with_response(200, PENDING_ORDER));
        let order = NewOrder::market_funds(Side::Buy, "BTC-USD", Decimal::from_str("25").unwrap());

        let placed = client.create_order(&order).await.unwrap();

        assert_eq!(placed.status, "pending");
        assert_eq!(placed.side, Side::Buy);
        assert_eq!(placed.order_type, OrderType::Limit);
        assert_eq!(placed.time_in_force, Some(TimeInForce::GTC));
        assert_eq!(placed.stp, Some(SelfTradePrevention::DecreaseCancel));
        assert_eq!(placed.price.unwrap().to_string(), "0.10000000");
        assert!(placed.done_at.is_none());

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/orders");
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"type":"market","side":"buy","product_id":"BTC-USD","funds":"25"}"#)
        );
    }

    #[tokio::test]
    async fn test_get_orders_query() {
        let client = mock_client(MockTransport::with_response(200, &format!("[{PENDING_ORDER}]")));
        let request = OrdersRequest::new()
            .limit(10)
            .status("open")
            .status("pending")
            .product_id("BTC-USD")
            .sort(SortedBy::CreatedAt, Sorting::Ascending)
            .date_range(datetime!(2021-01-01 0:00 UTC), datetime!(2021-01-02 0:00 UTC));

        let orders = client.get_orders(&request).await.unwrap();

        assert_eq!(orders.len(), 1);
        let sent = client.transport().last_request().unwrap();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(
            sent.path,
            "/orders?limit=10&status=open&status=pending&product_id=BTC-USD\
             &sorted_by=created_at&sorting=asc\
             &start_date=2021-01-01T00%3A00%3A00Z&end_date=2021-01-02T00%3A00%3A00Z"
        );
        assert_eq!(sent.body, None);
    }

    #[tokio::test]
    async fn test_get_orders_default_limit() {
        let client = mock_client(MockTransport::with_response(200, "[]"));

        client.get_orders(&OrdersRequest::default()).await.unwrap();

        assert_eq!(client.transport().last_request().unwrap().path, "/orders?limit=100");
    }

    #[tokio::test]
    async fn test_cancel_order() {
        let client = mock_client(MockTransport::with_response(200, r#""d0c5340b""#));

        let canceled = client.cancel_order("d0c5340b", Some("p1")).await.unwrap();

        assert_eq!(canceled, "d0c5340b");
        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/orders/d0c5340b?profile_id=p1");
    }

    #[tokio::test]
    async fn test_get_order_by_client_oid_signs_escaped_path() {
        let client = mock_client(MockTransport::with_response(200, PENDING_ORDER));

        client.get_order("client:my order").await.unwrap();

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.path, "/orders/client:my%20order");
        let credentials = crate::auth::Credentials::new("test_key", "dGVzdF9zZWNyZXQ=", "test_passphrase");
        let expected = crate::auth::sign_request(
            &credentials,
            "1700000000.000000",
            Method::Get,
            "/orders/client:my%20order",
            "",
        )
        .unwrap();
        assert_eq!(request.header("cb-access-sign"), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_cancel_order_id_cannot_inject_query() {
        let client = mock_client(MockTransport::with_response(200, r#""x""#));

        client.cancel_order("x?profile_id=other", Some("p1")).await.unwrap();

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.path, "/orders/x%3Fprofile_id%3Dother?profile_id=p1");
    }

    #[tokio::test]
    async fn test_cancel_all_orders() {
        let client = mock_client(MockTransport::with_response(200, r#"["a","b"]"#));

        let canceled = client.cancel_all_orders(None, Some("BTC-USD")).await.unwrap();

        assert_eq!(canceled, vec!["a", "b"]);
        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, Method::Delete);
        assert_eq!(request.path, "/orders?product_id=BTC-USD");
    }

    #[tokio::test]
    async fn test_cancel_rejected_order_surfaces_message() {
        let client = mock_client(MockTransport::with_response(400, r#"{"message":"order not found"}"#));

        let error = client.cancel_order("x", None).await.unwrap_err();

        assert_eq!(error.api_error().unwrap().message, "order not found");
    }
}
