//! Example wallet client
//!
//! Reads `YANDEX_MONEY_TOKEN` plus the optional `YANDEX_MONEY_*` config variables, prints
//! the account info and the last three operations, then runs a sandbox p2p payment.

use yandex_money::{
    build_obtain_token_url, scopes, ClientConfig, OperationHistoryOptions, PaymentOptions,
    RequestPaymentResponse, Wallet, YandexMoneyError,
};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Ok(token) = std::env::var("YANDEX_MONEY_TOKEN") else {
        let url = build_obtain_token_url(
            "your-client-id",
            "http://localhost:8000/redirect",
            &[scopes::ACCOUNT_INFO, scopes::OPERATION_HISTORY, scopes::PAYMENT_P2P],
        );
        println!("No YANDEX_MONEY_TOKEN set. Authorize the application at:\n{url}");
        return Ok(());
    };

    let wallet = Wallet::with_config(Some(token), ClientConfig::from_env()?)?;

    match wallet.account_info().await {
        Ok(info) => println!("Account: {}", info.payload),
        Err(YandexMoneyError::Token) => {
            println!("The token was rejected, obtain a new one");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let history = wallet
        .operation_history(&OperationHistoryOptions::new().with_records(3))
        .await?;
    println!("Recent operations: {}", history.payload["operations"]);

    let request: RequestPaymentResponse = wallet
        .request_payment(
            &PaymentOptions::p2p("410011161616877", "0.02".parse()?)
                .with_comment("sandbox payment")
                .with_test_result("success"),
        )
        .await?
        .json()?;

    if let Some(request_id) = request.request_id {
        let processed = wallet
            .process_payment(&PaymentOptions::process(request_id).with_test_result("success"))
            .await?;
        println!("Payment status: {:?}", processed.api_status());
    } else {
        println!("Payment request refused: {:?}", request.error);
    }

    Ok(())
}
