mod common;

use common::{dec, wallet_service};
use rust_decimal::Decimal;
use ticket_api::shared::errors::WalletError;

// Two racing debits that are each individually covered, but not together:
// exactly one may win.
#[tokio::test(flavor = "multi_thread")]
async fn racing_debits_never_overdraw() {
    let service = wallet_service();
    service.create_wallet(1, Some(dec(100))).await.unwrap();

    let (a, b) = tokio::join!(
        {
            let service = service.clone();
            async move { service.deduct_funds(1, dec(70), None).await }
        },
        {
            let service = service.clone();
            async move { service.deduct_funds(1, dec(70), None).await }
        },
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(loser, WalletError::InsufficientFunds { .. }));

    let wallet = service.get_wallet(1).await.unwrap();
    assert_eq!(wallet.balance, dec(30));
    assert_eq!(wallet.transactions.len(), 2); // opening credit + winning debit
    assert_eq!(wallet.balance, wallet.ledger_sum());
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_mixed_traffic_keeps_the_ledger_consistent() {
    let service = wallet_service();
    service.create_wallet(1, Some(dec(1000))).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..50u32 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                let _ = service.add_funds(1, dec(10), None).await;
            } else {
                let _ = service.deduct_funds(1, dec(25), None).await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let wallet = service.get_wallet(1).await.unwrap();
    assert!(wallet.balance >= Decimal::ZERO);
    assert_eq!(wallet.balance, wallet.ledger_sum());
}

#[tokio::test(flavor = "multi_thread")]
async fn racing_creates_yield_one_wallet() {
    let service = wallet_service();

    let (a, b) = tokio::join!(
        {
            let service = service.clone();
            async move { service.create_wallet(1, None).await }
        },
        {
            let service = service.clone();
            async move { service.create_wallet(1, None).await }
        },
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);

    let loser = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(loser, WalletError::AlreadyExists { user_id: 1 }));
}
