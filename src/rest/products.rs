//! Product metadata and market data.
//!
//! These endpoints are public. Requests are signed when the client has
//! credentials and sent unsigned otherwise.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::CoinbaseError;
use crate::rest::endpoints::{public, segment};
use crate::rest::{CoinbaseRestClient, Method, Params, Transport};
use crate::types::codec;
use crate::types::{Granularity, Side};

/// A tradable currency pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    /// Product ID, e.g. `BTC-USD`.
    pub id: String,
    /// Base currency.
    pub base_currency: String,
    /// Quote currency.
    pub quote_currency: String,
    /// Minimum order size in base currency.
    #[serde(default, with = "codec::amount::option")]
    pub base_min_size: Option<Decimal>,
    /// Maximum order size in base currency.
    #[serde(default, with = "codec::amount::option")]
    pub base_max_size: Option<Decimal>,
    /// Price tick.
    #[serde(with = "codec::amount")]
    pub quote_increment: Decimal,
    /// Size tick.
    #[serde(with = "codec::amount")]
    pub base_increment: Decimal,
    /// Human-readable name.
    pub display_name: String,
    /// Minimum funds for a market order.
    #[serde(default, with = "codec::amount::option")]
    pub min_market_funds: Option<Decimal>,
    /// Maximum funds for a market order.
    #[serde(default, with = "codec::amount::option")]
    pub max_market_funds: Option<Decimal>,
    /// Whether margin trading is enabled.
    #[serde(default)]
    pub margin_enabled: bool,
    /// Only post-only orders accepted.
    #[serde(default)]
    pub post_only: bool,
    /// Only limit orders accepted.
    #[serde(default)]
    pub limit_only: bool,
    /// Only cancellations accepted.
    #[serde(default)]
    pub cancel_only: bool,
    /// `online`, `offline`, `internal` or `delisted`.
    pub status: String,
    /// Details for the current status.
    #[serde(default)]
    pub status_message: String,
    /// Trading halted.
    #[serde(default)]
    pub trading_disabled: Option<bool>,
    /// Stablecoin pair.
    #[serde(default)]
    pub fx_stablecoin: Option<bool>,
    /// Maximum slippage for market orders.
    #[serde(default, with = "codec::amount::option")]
    pub max_slippage_percentage: Option<Decimal>,
    /// Product is in auction mode.
    #[serde(default)]
    pub auction_mode: bool,
}

/// Order book snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Book {
    /// Bids, best first.
    pub bids: Vec<BookEntry>,
    /// Asks, best first.
    pub asks: Vec<BookEntry>,
    /// Sequence number of the snapshot.
    pub sequence: u64,
    /// Product is in auction mode.
    #[serde(default)]
    pub auction_mode: Option<bool>,
    /// Auction state, during auctions.
    #[serde(default)]
    pub auction: Option<Auction>,
}

/// One price level (levels 1 and 2) or one order (level 3) of a [`Book`].
///
/// Sent on the wire as `[price, size, num_orders]` or `[price, size, order_id]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "BookRow")]
pub struct BookEntry {
    /// Price.
    pub price: Decimal,
    /// Size at this price.
    pub size: Decimal,
    /// Order count or order ID, depending on the book level.
    pub orders: BookOrders,
}

/// Third element of a [`BookEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookOrders {
    /// Number of orders at the level (levels 1 and 2).
    Count(u64),
    /// The single order (level 3).
    OrderId(String),
}

#[derive(Deserialize)]
struct BookRow(
    #[serde(with = "codec::amount")] Decimal,
    #[serde(with = "codec::amount")] Decimal,
    Value,
);

impl TryFrom<BookRow> for BookEntry {
    type Error = String;

    fn try_from(BookRow(price, size, orders): BookRow) -> Result<Self, Self::Error> {
        let orders = match orders {
            Value::Number(n) => n
                .as_u64()
                .map(BookOrders::Count)
                .ok_or_else(|| format!("invalid order count {n}"))?,
            Value::String(id) => BookOrders::OrderId(id),
            other => return Err(format!("unexpected book entry element {other}")),
        };
        Ok(Self { price, size, orders })
    }
}

/// Auction state of a [`Book`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Auction {
    /// Indicative open price.
    #[serde(with = "codec::amount")]
    pub open_price: Decimal,
    /// Indicative open size.
    #[serde(with = "codec::amount")]
    pub open_size: Decimal,
    /// Best bid price.
    #[serde(with = "codec::amount")]
    pub best_bid_price: Decimal,
    /// Best bid size.
    #[serde(with = "codec::amount")]
    pub best_bid_size: Decimal,
    /// Best ask price.
    #[serde(with = "codec::amount")]
    pub best_ask_price: Decimal,
    /// Best ask size.
    #[serde(with = "codec::amount")]
    pub best_ask_size: Decimal,
    /// Auction phase.
    pub auction_state: String,
    /// Whether the book can open.
    #[serde(default)]
    pub can_open: Option<String>,
    /// Time of the auction state.
    #[serde(default, with = "codec::timestamp::option")]
    pub time: Option<OffsetDateTime>,
}

/// One OHLCV bucket.
///
/// Sent on the wire as `[time, low, high, open, close, volume]` with `time`
/// in epoch seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "CandleRow")]
pub struct Candle {
    /// Bucket start.
    pub time: OffsetDateTime,
    /// Lowest price.
    pub low: Decimal,
    /// Highest price.
    pub high: Decimal,
    /// First trade price.
    pub open: Decimal,
    /// Last trade price.
    pub close: Decimal,
    /// Traded base volume.
    pub volume: Decimal,
}

#[derive(Deserialize)]
struct CandleRow(
    #[serde(with = "codec::timestamp")] OffsetDateTime,
    #[serde(with = "codec::amount")] Decimal,
    #[serde(with = "codec::amount")] Decimal,
    #[serde(with = "codec::amount")] Decimal,
    #[serde(with = "codec::amount")] Decimal,
    #[serde(with = "codec::amount")] Decimal,
);

impl From<CandleRow> for Candle {
    fn from(CandleRow(time, low, high, open, close, volume): CandleRow) -> Self {
        Self {
            time,
            low,
            high,
            open,
            close,
            volume,
        }
    }
}

/// Last trade, best bid and ask, and 24 hour volume.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ticker {
    /// ID of the last trade.
    pub trade_id: u64,
    /// Best ask.
    #[serde(with = "codec::amount")]
    pub ask: Decimal,
    /// Best bid.
    #[serde(with = "codec::amount")]
    pub bid: Decimal,
    /// 24 hour base volume.
    #[serde(with = "codec::amount")]
    pub volume: Decimal,
    /// Last trade price.
    #[serde(with = "codec::amount")]
    pub price: Decimal,
    /// Last trade size.
    #[serde(with = "codec::amount")]
    pub size: Decimal,
    /// Last trade time.
    #[serde(with = "codec::timestamp")]
    pub time: OffsetDateTime,
}

/// A public trade.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trade {
    /// Trade ID.
    pub trade_id: u64,
    /// Maker order side.
    pub side: Side,
    /// Trade size.
    #[serde(with = "codec::amount")]
    pub size: Decimal,
    /// Trade price.
    #[serde(with = "codec::amount")]
    pub price: Decimal,
    /// Trade time.
    #[serde(with = "codec::timestamp")]
    pub time: OffsetDateTime,
}

/// 24 hour and 30 day statistics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductStats {
    /// Price 24 hours ago.
    #[serde(with = "codec::amount")]
    pub open: Decimal,
    /// 24 hour high.
    #[serde(with = "codec::amount")]
    pub high: Decimal,
    /// 24 hour low.
    #[serde(with = "codec::amount")]
    pub low: Decimal,
    /// Last price.
    #[serde(with = "codec::amount")]
    pub last: Decimal,
    /// 24 hour base volume.
    #[serde(with = "codec::amount")]
    pub volume: Decimal,
    /// 30 day base volume.
    #[serde(default, with = "codec::amount::option")]
    pub volume_30day: Option<Decimal>,
}

impl<T: Transport> CoinbaseRestClient<T> {
    /// Get a single product.
    pub async fn get_product(&self, product_id: &str) -> Result<Product, CoinbaseError> {
        let path = format!("{}/{}", public::PRODUCTS, segment(product_id));
        self.dispatch_public(Method::Get, &path, None).await
    }

    /// List all products.
    pub async fn get_products(&self) -> Result<Vec<Product>, CoinbaseError> {
        self.dispatch_public(Method::Get, public::PRODUCTS, None)
            .await
    }

    /// Get the order book.
    ///
    /// Level 1 is the best bid and ask, level 2 the full aggregated book and
    /// level 3 the full book with individual orders. Other levels are rejected
    /// without sending a request.
    pub async fn get_product_book(&self, product_id: &str, level: u8) -> Result<Book, CoinbaseError> {
        if !(1..=3).contains(&level) {
            return Err(CoinbaseError::InvalidParameter(format!(
                "book level must be 1, 2 or 3, got {level}"
            )));
        }

        let path = Params::new()
            .insert("level", u32::from(level))
            .path_with_query(&format!("{}/{}/book", public::PRODUCTS, segment(product_id)))?;

        self.dispatch_public(Method::Get, &path, None).await
    }

    /// Get historic OHLCV buckets, newest first.
    ///
    /// The exchange returns at most 300 buckets per call.
    pub async fn get_product_candles(
        &self,
        product_id: &str,
        granularity: Granularity,
        start: Option<OffsetDateTime>,
        end: Option<OffsetDateTime>,
    ) -> Result<Vec<Candle>, CoinbaseError> {
        let path = Params::new()
            .insert("granularity", u32::from(granularity))
            .insert("start", start.as_ref().map(codec::rfc3339_param).transpose()?)
            .insert("end", end.as_ref().map(codec::rfc3339_param).transpose()?)
            .path_with_query(&format!("{}/{}/candles", public::PRODUCTS, segment(product_id)))?;

        self.dispatch_public(Method::Get, &path, None).await
    }

    /// Get 24 hour and 30 day statistics.
    pub async fn get_product_stats(&self, product_id: &str) -> Result<ProductStats, CoinbaseError> {
        let path = format!("{}/{}/stats", public::PRODUCTS, segment(product_id));
        self.dispatch_public(Method::Get, &path, None).await
    }

    /// Get the ticker.
    pub async fn get_product_ticker(&self, product_id: &str) -> Result<Ticker, CoinbaseError> {
        let path = format!("{}/{}/ticker", public::PRODUCTS, segment(product_id));
        self.dispatch_public(Method::Get, &path, None).await
    }

    /// Get the latest trades.
    ///
    /// `before` and `after` are trade ID cursors.
    pub async fn get_product_trades(
        &self,
        product_id: &str,
        limit: Option<u32>,
        before: Option<u64>,
        after: Option<u64>,
    ) -> Result<Vec<Trade>, CoinbaseError> {
        let path = Params::new()
            .insert("limit", limit)
            .insert("before", before)
            .insert("after", after)
            .path_with_query(&format!("{}/{}/trades", public::PRODUCTS, segment(product_id)))?;

        self.dispatch_public(Method::Get, &path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::mock::{MockTransport, public_client};
    use std::str::FromStr;
    use time::macros::datetime;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[tokio::test]
    async fn test_get_product() {
        let body = r#"{
            "id": "BTC-USD",
            "base_currency": "BTC",
            "quote_currency": "USD",
            "quote_increment": "0.01000000",
            "base_increment": "0.00000001",
            "display_name": "BTC/USD",
            "min_market_funds": "1",
            "margin_enabled": false,
            "post_only": false,
            "limit_only": false,
            "cancel_only": false,
            "status": "online",
            "status_message": "",
            "auction_mode": false
        }"#;
        let client = public_client(MockTransport::with_response(200, body));

        let product = client.get_product("BTC-USD").await.unwrap();

        assert_eq!(product.quote_increment.to_string(), "0.01000000");
        assert!(product.base_min_size.is_none());
        assert_eq!(client.transport().last_request().unwrap().path, "/products/BTC-USD");
    }

    #[tokio::test]
    async fn test_get_product_book_levels() {
        let body = r#"{
            "bids": [["295.96", "4.39088265", 2]],
            "asks": [["295.97", "25.23542881", 12]],
            "sequence": 3,
            "auction_mode": false,
            "auction": null
        }"#;
        let client = public_client(MockTransport::with_response(200, body));

        let book = client.get_product_book("BTC-USD", 2).await.unwrap();

        assert_eq!(book.bids[0].price, dec("295.96"));
        assert_eq!(book.bids[0].orders, BookOrders::Count(2));
        assert_eq!(book.asks[0].size, dec("25.23542881"));
        assert_eq!(book.sequence, 3);
        assert_eq!(
            client.transport().last_request().unwrap().path,
            "/products/BTC-USD/book?level=2"
        );
    }

    #[tokio::test]
    async fn test_get_product_book_level3_order_ids() {
        let body = r#"{
            "bids": [["295.96", "0.05", "3b0f1225-7f84-490b-a29f-0faef9de823a"]],
            "asks": [],
            "sequence": 7
        }"#;
        let client = public_client(MockTransport::with_response(200, body));

        let book = client.get_product_book("BTC-USD", 3).await.unwrap();

        assert_eq!(
            book.bids[0].orders,
            BookOrders::OrderId("3b0f1225-7f84-490b-a29f-0faef9de823a".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_product_book_rejects_bad_level() {
        let client = public_client(MockTransport::default());

        let result = client.get_product_book("BTC-USD", 4).await;

        assert!(matches!(result, Err(CoinbaseError::InvalidParameter(_))));
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_product_candles() {
        let body = "[[1415398768, 0.32, 4.2, 0.35, 4.2, 12.3]]";
        let client = public_client(MockTransport::with_response(200, body));

        let candles = client
            .get_product_candles(
                "BTC-USD",
                Granularity::Day1,
                Some(datetime!(2021-01-01 0:00 UTC)),
                None,
            )
            .await
            .unwrap();

        assert_eq!(candles[0].time, datetime!(2014-11-07 22:19:28 UTC));
        assert_eq!(candles[0].low, dec("0.32"));
        assert_eq!(candles[0].high, dec("4.2"));
        assert_eq!(candles[0].volume, dec("12.3"));
        assert_eq!(
            client.transport().last_request().unwrap().path,
            "/products/BTC-USD/candles?granularity=86400&start=2021-01-01T00%3A00%3A00Z"
        );
    }

    #[tokio::test]
    async fn test_get_product_candles_rejects_unrepresentable_start() {
        let client = public_client(MockTransport::default());
        let start = time::Date::from_calendar_date(-1, time::Month::January, 1)
            .unwrap()
            .midnight()
            .assume_utc();

        let result = client
            .get_product_candles("BTC-USD", Granularity::Hour1, Some(start), None)
            .await;

        assert!(matches!(result, Err(CoinbaseError::InvalidParameter(_))));
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_get_product_escapes_id() {
        let client = public_client(MockTransport::with_response(404, r#"{"message":"NotFound"}"#));

        let result = client.get_product("BTC/USD").await;

        assert!(result.unwrap_err().api_error().unwrap().is_not_found());
        assert_eq!(client.transport().last_request().unwrap().path, "/products/BTC%2FUSD");
    }

    #[tokio::test]
    async fn test_get_product_ticker() {
        let body = r#"{
            "trade_id": 4729088,
            "price": "333.99",
            "size": "0.193",
            "bid": "333.98",
            "ask": "333.99",
            "volume": "5957.11914015",
            "time": "2015-11-14T20:46:03.511254Z"
        }"#;
        let client = public_client(MockTransport::with_response(200, body));

        let ticker = client.get_product_ticker("BTC-USD").await.unwrap();

        assert_eq!(ticker.trade_id, 4729088);
        assert_eq!(ticker.price, dec("333.99"));
        assert_eq!(client.transport().last_request().unwrap().path, "/products/BTC-USD/ticker");
    }

    #[tokio::test]
    async fn test_get_product_trades() {
        let body = r#"[{
            "time": "2014-11-07T22:19:28.578544Z",
            "trade_id": 74,
            "price": "10.00000000",
            "size": "0.01000000",
            "side": "buy"
        }]"#;
        let client = public_client(MockTransport::with_response(200, body));

        let trades = client.get_product_trades("BTC-USD", Some(1), None, Some(75)).await.unwrap();

        assert_eq!(trades[0].side, Side::Buy);
        assert_eq!(
            client.transport().last_request().unwrap().path,
            "/products/BTC-USD/trades?limit=1&after=75"
        );
    }

    #[tokio::test]
    async fn test_get_product_stats() {
        let body = r#"{
            "open": "5414.18000000",
            "high": "6441.37000000",
            "low": "5261.69000000",
            "last": "6225.12000000",
            "volume": "53687.76764233",
            "volume_30day": "786763.72930864"
        }"#;
        let client = public_client(MockTransport::with_response(200, body));

        let stats = client.get_product_stats("BTC-USD").await.unwrap();

        assert_eq!(stats.last, dec("6225.12000000"));
        assert_eq!(stats.volume_30day, Some(dec("786763.72930864")));
    }
}
