use crate::shared::config::Config;
use crate::shared::utils::receipt::ReceiptIdGenerator;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

/// Payment order returned by the gateway, converted back to the platform's
/// base currency unit before it crosses this boundary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = PaymentOrder)]
pub struct PaymentOrder {
    pub order_id: String,
    pub status: String,
    pub amount: Decimal,
    pub currency: String,
}

/// Narrow contract for the external payment gateway.
/// The only obligation is creating a payment order for an amount in the
/// platform's base currency unit; no gateway-specific types leak past this
/// trait, so tests substitute a double.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_order(&self, amount: Decimal) -> Result<PaymentOrder>;
}

// Wire shape of the gateway's order object
#[derive(Debug, Deserialize)]
struct GatewayOrder {
    id: String,
    status: String,
    amount: i64,
    currency: String,
}

/// Razorpay orders API client
pub struct RazorpayClient {
    http_client: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
    currency: String,
}

impl RazorpayClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: config.gateway_base_url.clone(),
            key_id: config.gateway_key_id.clone(),
            key_secret: config.gateway_key_secret.clone(),
            currency: config.currency.clone(),
        })
    }
}

/// Convert a base-currency amount into the gateway's smallest unit
/// (e.g. rupees to paise).
fn to_smallest_unit(amount: Decimal) -> Result<i64> {
    let subunits = amount * Decimal::ONE_HUNDRED;
    if subunits.fract() != Decimal::ZERO {
        anyhow::bail!("Amount {} has sub-unit precision the gateway cannot represent", amount);
    }
    subunits
        .to_i64()
        .with_context(|| format!("Amount {} out of range for gateway", amount))
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, amount: Decimal) -> Result<PaymentOrder> {
        let url = format!("{}/orders", self.base_url);
        let receipt = ReceiptIdGenerator::next();
        let amount_subunits = to_smallest_unit(amount)?;

        tracing::info!(%receipt, %amount, "Creating gateway payment order");

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount_subunits,
                "currency": self.currency,
                "receipt": receipt,
            }))
            .send()
            .await
            .context("Failed to send request to payment gateway")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Payment gateway returned error: {} - {}", status, body);
        }

        let order: GatewayOrder = response
            .json()
            .await
            .context("Failed to parse payment gateway response")?;

        Ok(PaymentOrder {
            order_id: order.id,
            status: order.status,
            // back to base currency units
            amount: Decimal::from(order.amount) / Decimal::ONE_HUNDRED,
            currency: order.currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_base_units_to_smallest_unit() {
        assert_eq!(to_smallest_unit(Decimal::new(500, 0)).unwrap(), 50_000);
        assert_eq!(to_smallest_unit(Decimal::new(12_345, 2)).unwrap(), 12_345);
    }

    #[test]
    fn rejects_sub_paise_precision() {
        assert!(to_smallest_unit(Decimal::new(10_001, 3)).is_err());
    }
}
