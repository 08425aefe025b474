//! Example: Reading balances and fees with API credentials.
//!
//! Run with: cargo run --example private_account

use std::sync::Arc;

use coinbase_exchange_client::auth::EnvCredentials;
use coinbase_exchange_client::rest::CoinbaseRestClient;
use coinbase_exchange_client::CoinbaseError;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => Arc::new(creds),
        None => {
            println!(
                "Set COINBASE_API_KEY, COINBASE_API_SECRET and COINBASE_API_PASSPHRASE to run this example."
            );
            return Ok(());
        }
    };

    let client = CoinbaseRestClient::builder()
        .use_sandbox()
        .credentials(credentials)
        .build()?;

    let accounts = client.get_accounts().await?;
    for account in accounts.iter().filter(|a| !a.balance.is_zero()) {
        println!(
            "{}: balance={} available={} hold={}",
            account.currency, account.balance, account.available, account.hold
        );
    }

    let fees = client.get_fees().await?;
    println!("Maker: {} Taker: {}", fees.maker_fee_rate, fees.taker_fee_rate);

    match client.get_order("does-not-exist").await {
        Err(CoinbaseError::Api(error)) if error.is_not_found() => {
            println!("Unknown order: {}", error.message);
        }
        Err(error) => return Err(error.into()),
        Ok(order) => println!("Order status: {}", order.status),
    }

    Ok(())
}
