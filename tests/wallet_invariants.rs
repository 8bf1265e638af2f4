mod common;

use common::{
    dec, wallet_service, wallet_service_with_gateway, MockPaymentGateway,
    UnsyncedLookupRepository,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use ticket_api::domains::wallet::models::TransactionType;
use ticket_api::domains::wallet::services::WalletService;
use ticket_api::shared::errors::WalletError;

#[tokio::test]
async fn deposit_then_withdraw_updates_balance_and_log() {
    let service = wallet_service();
    service.create_wallet(1, None).await.unwrap();

    let wallet = service
        .add_funds(1, dec(500), Some("top-up".to_string()))
        .await
        .unwrap();
    assert_eq!(wallet.balance, dec(500));

    let wallet = service
        .deduct_funds(1, dec(200), Some("purchase".to_string()))
        .await
        .unwrap();
    assert_eq!(wallet.balance, dec(300));

    assert_eq!(wallet.transactions.len(), 2);
    assert_eq!(wallet.transactions[0].tx_type, TransactionType::Credit);
    assert_eq!(wallet.transactions[0].amount, dec(500));
    assert_eq!(wallet.transactions[1].tx_type, TransactionType::Debit);
    assert_eq!(wallet.transactions[1].amount, dec(200));
    assert_eq!(wallet.transactions[1].description.as_deref(), Some("purchase"));
}

#[tokio::test]
async fn over_debit_is_rejected_and_leaves_state_untouched() {
    let service = wallet_service();
    service.create_wallet(1, Some(dec(100))).await.unwrap();

    let err = service.deduct_funds(1, dec(150), None).await.unwrap_err();
    assert!(matches!(
        err,
        WalletError::InsufficientFunds { balance, requested }
            if balance == dec(100) && requested == dec(150)
    ));

    // rejected debit must not touch balance or log
    let wallet = service.get_wallet(1).await.unwrap();
    assert_eq!(wallet.balance, dec(100));
    assert_eq!(wallet.transactions.len(), 1);
}

#[tokio::test]
async fn debit_of_exact_balance_empties_the_wallet() {
    let service = wallet_service();
    service.create_wallet(1, Some(dec(100))).await.unwrap();

    let wallet = service.deduct_funds(1, dec(100), None).await.unwrap();
    assert_eq!(wallet.balance, Decimal::ZERO);
}

#[tokio::test]
async fn duplicate_wallet_creation_conflicts() {
    let service = wallet_service();
    service.create_wallet(7, None).await.unwrap();

    let err = service.create_wallet(7, None).await.unwrap_err();
    assert!(matches!(err, WalletError::AlreadyExists { user_id: 7 }));
}

// The pre-insert existence check can miss a wallet created by another API
// instance; the store's uniqueness check must still surface a conflict, not
// a storage failure.
#[tokio::test]
async fn duplicate_creation_across_instances_is_a_conflict() {
    let service = WalletService::new(
        Arc::new(UnsyncedLookupRepository::default()),
        Arc::new(MockPaymentGateway::new()),
    );
    service.create_wallet(3, None).await.unwrap();

    let err = service.create_wallet(3, None).await.unwrap_err();
    assert!(matches!(err, WalletError::AlreadyExists { user_id: 3 }));
}

#[tokio::test]
async fn missing_wallet_is_not_found() {
    let service = wallet_service();

    let err = service.get_wallet(42).await.unwrap_err();
    assert!(matches!(err, WalletError::NotFound { user_id: 42 }));

    let err = service.add_funds(42, dec(10), None).await.unwrap_err();
    assert!(matches!(err, WalletError::NotFound { user_id: 42 }));
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let service = wallet_service();
    service.create_wallet(1, None).await.unwrap();

    for amount in [Decimal::ZERO, dec(-5)] {
        let err = service.add_funds(1, amount, None).await.unwrap_err();
        assert!(matches!(err, WalletError::InvalidAmount { .. }));

        let err = service.deduct_funds(1, amount, None).await.unwrap_err();
        assert!(matches!(err, WalletError::InvalidAmount { .. }));
    }

    let err = service.create_wallet(2, Some(dec(-1))).await.unwrap_err();
    assert!(matches!(err, WalletError::InvalidAmount { .. }));
}

#[tokio::test]
async fn opening_balance_is_recorded_as_a_credit() {
    let service = wallet_service();
    let wallet = service.create_wallet(1, Some(dec(250))).await.unwrap();

    assert_eq!(wallet.balance, dec(250));
    assert_eq!(wallet.transactions.len(), 1);
    assert_eq!(wallet.transactions[0].tx_type, TransactionType::Credit);
    assert_eq!(wallet.transactions[0].amount, dec(250));
}

#[tokio::test]
async fn balance_always_equals_ledger_sum() {
    let service = wallet_service();
    service.create_wallet(1, Some(dec(1000))).await.unwrap();

    service.deduct_funds(1, dec(300), None).await.unwrap();
    service.add_funds(1, dec(50), None).await.unwrap();
    service.refund(1, dec(300), Some("cancelled order".to_string())).await.unwrap();
    let _ = service.deduct_funds(1, dec(100_000), None).await; // rejected

    let wallet = service.get_wallet(1).await.unwrap();
    assert_eq!(wallet.balance, dec(1050));
    assert_eq!(wallet.balance, wallet.ledger_sum());
    assert_eq!(wallet.transactions.len(), 4);
    assert_eq!(wallet.transactions[3].tx_type, TransactionType::Refund);
}

#[tokio::test]
async fn reads_do_not_change_state() {
    let service = wallet_service();
    service.create_wallet(1, Some(dec(75))).await.unwrap();

    let first = service.get_wallet(1).await.unwrap();
    let second = service.get_wallet(1).await.unwrap();

    assert_eq!(first.balance, second.balance);
    assert_eq!(first.transactions.len(), second.transactions.len());
    assert_eq!(first.updated_at, second.updated_at);
}

#[tokio::test]
async fn wallets_are_isolated_per_user() {
    let service = wallet_service();
    service.create_wallet(1, Some(dec(100))).await.unwrap();
    service.create_wallet(2, Some(dec(900))).await.unwrap();

    service.deduct_funds(1, dec(40), None).await.unwrap();

    assert_eq!(service.get_wallet(1).await.unwrap().balance, dec(60));
    assert_eq!(service.get_wallet(2).await.unwrap().balance, dec(900));
}

#[tokio::test]
async fn listing_paginates_and_counts() {
    let service = wallet_service();
    for user_id in 1..=5 {
        service.create_wallet(user_id, None).await.unwrap();
    }

    let (page, total) = service
        .list_wallets(&ticket_api::domains::wallet::models::WalletQuery {
            user_id: None,
            offset: 1,
            limit: Some(2),
        })
        .await
        .unwrap();

    assert_eq!(total, 5);
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].user_id, 2);
    assert_eq!(page[1].user_id, 3);
}

#[tokio::test]
async fn topup_order_goes_through_the_gateway() {
    let gateway = Arc::new(MockPaymentGateway::new());
    let service = wallet_service_with_gateway(gateway.clone());
    service.create_wallet(1, None).await.unwrap();

    let order = service.create_topup_order(1, dec(500)).await.unwrap();

    assert_eq!(order.amount, dec(500));
    assert_eq!(order.status, "created");
    assert_eq!(gateway.requested.lock().as_slice(), &[dec(500)]);

    // no wallet mutation until the payment is captured
    let wallet = service.get_wallet(1).await.unwrap();
    assert_eq!(wallet.balance, Decimal::ZERO);
    assert!(wallet.transactions.is_empty());
}

#[tokio::test]
async fn topup_order_requires_a_wallet_and_a_positive_amount() {
    let service = wallet_service();

    let err = service.create_topup_order(9, dec(100)).await.unwrap_err();
    assert!(matches!(err, WalletError::NotFound { user_id: 9 }));

    service.create_wallet(9, None).await.unwrap();
    let err = service.create_topup_order(9, Decimal::ZERO).await.unwrap_err();
    assert!(matches!(err, WalletError::InvalidAmount { .. }));
}

#[tokio::test]
async fn gateway_failure_surfaces_as_upstream_error() {
    let service = wallet_service_with_gateway(Arc::new(MockPaymentGateway::failing()));
    service.create_wallet(1, None).await.unwrap();

    let err = service.create_topup_order(1, dec(100)).await.unwrap_err();
    assert!(matches!(err, WalletError::UpstreamFailure(_)));
}
