//! # TollPay Demo
//!
//! Walks through one dashboard session against the mock backend and prints
//! every command response as JSON.
//!
//! ## Usage
//! ```bash
//! # Default: 1s simulated latency per backend call
//! cargo run -p tollpay-session --bin tollpay-demo
//!
//! # Instant backend, verbose logs
//! TOLLPAY_SIMULATED_DELAY_MS=0 RUST_LOG=debug cargo run -p tollpay-session --bin tollpay-demo
//! ```

use serde::Serialize;
use tollpay_core::views::{KindFilter, TransactionFilter};
use tollpay_core::{AutoRechargeUpdate, Money};
use tollpay_session::backend::{DEMO_EMAIL, DEMO_PASSWORD};
use tollpay_session::commands;
use tollpay_session::{init_tracing, Session, SessionConfig};

fn print_json<T: Serialize>(title: &str, value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("── {} ──", title);
    println!("{}", serde_json::to_string_pretty(value)?);
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = SessionConfig::from_env();
    println!("🚗 TollPay Demo Session");
    println!("=======================");
    println!("Simulated latency: {} ms", config.simulated_delay_ms);
    println!();

    let session = Session::new(config);
    let (auth, fastag) = (&session.auth, &session.fastag);

    // Wrong password first: the session stays anonymous
    if let Err(e) = commands::login(auth, DEMO_EMAIL, "hunter2").await {
        print_json("login (wrong password)", &e)?;
    }

    let user = commands::login(auth, DEMO_EMAIL, DEMO_PASSWORD).await?;
    println!("✓ Signed in as {}", user.name);
    println!();

    if let Err(e) = commands::recharge(fastag, Money::from_rupees(500)).await {
        print_json("recharge (no tag yet)", &e)?;
    }

    if let Err(e) = commands::link_fastag(fastag, "1234", "MH1AB1234").await {
        print_json("link_fastag (invalid form)", &e)?;
    }

    let tag = commands::link_fastag(fastag, "1234567890123456", "mh01ab1234").await?;
    println!("✓ Linked FASTag {} to {}", tag.tag_id, tag.vehicle_number);

    let bank = commands::link_bank_account(fastag, "HDFC Bank", "987654321098", "987654321098", "hdfc0001234").await?;
    println!("✓ Linked {} account {}", bank.bank_name, bank.masked_account_number);
    println!();

    let settings = commands::update_auto_recharge_settings(
        fastag,
        AutoRechargeUpdate::default()
            .enabled(true)
            .min_threshold(Money::from_rupees(500)),
    )
    .await?;
    print_json("auto-recharge settings", &settings)?;

    print_json("dashboard (low balance)", &commands::get_dashboard(auth, fastag).await)?;

    let topped_up = commands::recharge(fastag, Money::from_rupees(1000)).await?;
    println!("✓ Recharged, balance {}", session.config.format_currency(topped_up.balance));

    let toll = commands::deduct_toll(fastag, Money::from_rupees(65), "Toll Payment - NH48").await?;
    println!("✓ Toll paid, balance {}", session.config.format_currency(toll.balance));
    println!();

    let tolls = commands::list_transactions(fastag, &TransactionFilter::new(KindFilter::Deduction, "toll")).await;
    print_json("toll history", &tolls)?;
    print_json("balance chart", &commands::get_balance_chart(fastag).await)?;

    let snapshot = commands::logout(auth).await;
    println!("✓ Signed out (authenticated: {})", snapshot.is_authenticated);

    Ok(())
}
