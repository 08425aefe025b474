//! Common domain types for the Coinbase Exchange API.

use serde::{Deserialize, Serialize};

/// Buy or sell side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Order type for trading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Limit order - execute at specified price or better
    #[default]
    Limit,
    /// Market order - execute immediately at best available price
    Market,
    /// Stop order - placed on the book once the stop price is reached
    Stop,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OrderType::Limit => "limit",
            OrderType::Market => "market",
            OrderType::Stop => "stop",
        };
        write!(f, "{}", s)
    }
}

/// Time in force for orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till canceled (default)
    #[default]
    GTC,
    /// Good till time - expires after `cancel_after`
    GTT,
    /// Immediate or cancel - fill what's possible immediately, cancel rest
    IOC,
    /// Fill or kill - fill completely or not at all
    FOK,
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TimeInForce::GTC => "GTC",
            TimeInForce::GTT => "GTT",
            TimeInForce::IOC => "IOC",
            TimeInForce::FOK => "FOK",
        };
        write!(f, "{}", s)
    }
}

/// Lifetime of a good-till-time order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelAfter {
    /// One minute
    Min,
    /// One hour
    Hour,
    /// One day
    Day,
}

impl std::fmt::Display for CancelAfter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancelAfter::Min => write!(f, "min"),
            CancelAfter::Hour => write!(f, "hour"),
            CancelAfter::Day => write!(f, "day"),
        }
    }
}

/// Self-trade prevention mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelfTradePrevention {
    /// Decrease and cancel (default)
    #[default]
    #[serde(rename = "dc")]
    DecreaseCancel,
    /// Cancel oldest order
    #[serde(rename = "co")]
    CancelOldest,
    /// Cancel newest order
    #[serde(rename = "cn")]
    CancelNewest,
    /// Cancel both orders
    #[serde(rename = "cb")]
    CancelBoth,
}

impl std::fmt::Display for SelfTradePrevention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SelfTradePrevention::DecreaseCancel => "dc",
            SelfTradePrevention::CancelOldest => "co",
            SelfTradePrevention::CancelNewest => "cn",
            SelfTradePrevention::CancelBoth => "cb",
        };
        write!(f, "{}", s)
    }
}

/// Direction of a stop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopOrderType {
    /// Triggers when the last trade price falls to the stop price
    Loss,
    /// Triggers when the last trade price rises to the stop price
    Entry,
}

impl std::fmt::Display for StopOrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopOrderType::Loss => write!(f, "loss"),
            StopOrderType::Entry => write!(f, "entry"),
        }
    }
}

/// Sort key for order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortedBy {
    /// Creation time
    CreatedAt,
    /// Limit price
    Price,
    /// Order size
    Size,
    /// Order ID
    OrderId,
    /// Order side
    Side,
    /// Order type
    Type,
}

impl std::fmt::Display for SortedBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SortedBy::CreatedAt => "created_at",
            SortedBy::Price => "price",
            SortedBy::Size => "size",
            SortedBy::OrderId => "order_id",
            SortedBy::Side => "side",
            SortedBy::Type => "type",
        };
        write!(f, "{}", s)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sorting {
    /// Descending
    #[serde(rename = "desc")]
    Descending,
    /// Ascending
    #[serde(rename = "asc")]
    Ascending,
}

impl std::fmt::Display for Sorting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sorting::Descending => write!(f, "desc"),
            Sorting::Ascending => write!(f, "asc"),
        }
    }
}

/// Candle width in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum Granularity {
    /// 1 minute
    #[default]
    Minute1,
    /// 5 minutes
    Minute5,
    /// 15 minutes
    Minute15,
    /// 1 hour
    Hour1,
    /// 6 hours
    Hour6,
    /// 1 day
    Day1,
}

impl From<Granularity> for u32 {
    fn from(granularity: Granularity) -> u32 {
        match granularity {
            Granularity::Minute1 => 60,
            Granularity::Minute5 => 300,
            Granularity::Minute15 => 900,
            Granularity::Hour1 => 3600,
            Granularity::Hour6 => 21600,
            Granularity::Day1 => 86400,
        }
    }
}

impl TryFrom<u32> for Granularity {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            60 => Ok(Granularity::Minute1),
            300 => Ok(Granularity::Minute5),
            900 => Ok(Granularity::Minute15),
            3600 => Ok(Granularity::Hour1),
            21600 => Ok(Granularity::Hour6),
            86400 => Ok(Granularity::Day1),
            _ => Err(format!("Invalid candle granularity: {}", value)),
        }
    }
}

/// Output format of a generated report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// PDF document
    #[default]
    Pdf,
    /// CSV file
    Csv,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Pdf => write!(f, "pdf"),
            ReportFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Kind of report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    /// Fills for one or all products
    #[default]
    Fills,
    /// Account history
    Account,
    /// OTC fills
    OtcFills,
    /// 1099-K transaction history
    #[serde(rename = "type_1099k_transaction_history")]
    TransactionHistory,
    /// Tax invoice
    TaxInvoice,
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReportType::Fills => "fills",
            ReportType::Account => "account",
            ReportType::OtcFills => "otc_fills",
            ReportType::TransactionHistory => "type_1099k_transaction_history",
            ReportType::TaxInvoice => "tax_invoice",
        };
        write!(f, "{}", s)
    }
}
