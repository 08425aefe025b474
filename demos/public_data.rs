//! Example: Fetching public market data from Coinbase Exchange.
//!
//! Run with: cargo run --example public_data

use coinbase_exchange_client::rest::CoinbaseRestClient;
use coinbase_exchange_client::types::Granularity;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // No credentials: public endpoints go out unsigned
    let client = CoinbaseRestClient::builder().build()?;

    println!("=== Products ===");
    let products = client.get_products().await?;
    for product in products.iter().take(5) {
        println!(
            "{}: base={}, quote={}, status={}",
            product.id, product.base_currency, product.quote_currency, product.status
        );
    }

    println!("\n=== Ticker (BTC-USD) ===");
    let ticker = client.get_product_ticker("BTC-USD").await?;
    println!("Price: {} Bid: {} Ask: {}", ticker.price, ticker.bid, ticker.ask);

    println!("\n=== Order Book (BTC-USD, level 2) ===");
    let book = client.get_product_book("BTC-USD", 2).await?;
    for ask in book.asks.iter().take(3) {
        println!("  ask {} @ {}", ask.size, ask.price);
    }
    for bid in book.bids.iter().take(3) {
        println!("  bid {} @ {}", bid.size, bid.price);
    }

    println!("\n=== Candles (BTC-USD, 1 hour) ===");
    let candles = client
        .get_product_candles("BTC-USD", Granularity::Hour1, None, None)
        .await?;
    for candle in candles.iter().take(3) {
        println!(
            "  {} O: {} H: {} L: {} C: {} Vol: {}",
            candle.time, candle.open, candle.high, candle.low, candle.close, candle.volume
        );
    }

    println!("\n=== Recent Trades (BTC-USD) ===");
    let trades = client.get_product_trades("BTC-USD", Some(5), None, None).await?;
    for trade in &trades {
        println!("  {} {} @ {}", trade.side, trade.size, trade.price);
    }

    Ok(())
}
