use anypay::{build_from_env, GetPayments};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Reads ANYPAY_API_ID / ANYPAY_API_KEY / ANYPAY_PROJECT_ID, from .env if present
    let client = build_from_env()?;
    client.validate_credentials().await?;

    let balance = client.get_balance().await?;
    println!("Balance: {}", balance.balance);

    match client.get_rates().await {
        Ok(rates) => {
            for (method, rate) in &rates.incoming {
                println!("Rate in  {:<12} {}", method, rate);
            }
            for (method, rate) in &rates.out {
                println!("Rate out {:<12} {}", method, rate);
            }
        }
        Err(e) => println!("Error fetching rates: {}", e),
    }

    if client.config().project_id.is_some() {
        let payments = client.get_payments(GetPayments::new()).await?;
        println!("Found {} payments", payments.len());
        for payment in payments.iter().take(5) {
            println!(
                "Payment {} ({}): {} {} [{}]",
                payment.pay_id, payment.method, payment.amount, payment.currency, payment.status
            );
        }
    }

    Ok(())
}
