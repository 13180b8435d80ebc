//! Payment provider client for hosted checkout sessions.
//!
//! Talks to the Stripe Checkout Sessions API over HTTPS. The cart is never
//! mutated here; clearing it belongs to a post-payment webhook that is out
//! of scope.

use serde::Deserialize;
use thiserror::Error;

use crate::config::AppConfig;
use crate::schemas::CartItemView;

/// Payment provider API base URL.
const BASE_URL: &str = "https://api.stripe.com/v1";

/// Errors that can occur when talking to the payment provider.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// One entry of a checkout session: a product at a fixed unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub name: String,
    pub img: String,
    /// Unit price in minor currency units (cents).
    pub unit_amount: i64,
    pub quantity: i64,
}

/// Convert joined cart rows into checkout line items.
///
/// Prices are stored in major units and the provider expects minor units,
/// hence the x100 conversion.
pub fn build_line_items(rows: &[CartItemView]) -> Vec<LineItem> {
    rows.iter()
        .map(|row| LineItem {
            name: row.product.name.clone(),
            img: row.product.img.clone(),
            unit_amount: (row.product.price * 100.0).round() as i64,
            quantity: i64::from(row.quantity),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct CheckoutSession {
    url: String,
}

/// Client for the payment provider's checkout-session API.
#[derive(Clone, Debug)]
pub struct PaymentClient {
    http: reqwest::Client,
    secret_key: String,
    currency: String,
    success_url: String,
    cancel_url: String,
}

impl PaymentClient {
    /// Create a new client from configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            secret_key: config.stripe_secret_key.clone(),
            currency: config.checkout_currency.clone(),
            success_url: config.checkout_success_url.clone(),
            cancel_url: config.checkout_cancel_url.clone(),
        }
    }

    /// Create a hosted checkout session and return its redirect URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects it.
    pub async fn create_checkout_session(
        &self,
        email: &str,
        items: &[LineItem],
    ) -> Result<String, PaymentError> {
        let mut params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("success_url".to_string(), self.success_url.clone()),
            ("cancel_url".to_string(), self.cancel_url.clone()),
        ];
        if !email.is_empty() {
            params.push(("customer_email".to_string(), email.to_string()));
        }
        for (i, item) in items.iter().enumerate() {
            params.push((
                format!("line_items[{i}][quantity]"),
                item.quantity.to_string(),
            ));
            params.push((
                format!("line_items[{i}][price_data][currency]"),
                self.currency.clone(),
            ));
            params.push((
                format!("line_items[{i}][price_data][unit_amount]"),
                item.unit_amount.to_string(),
            ));
            params.push((
                format!("line_items[{i}][price_data][product_data][name]"),
                item.name.clone(),
            ));
            params.push((
                format!("line_items[{i}][price_data][product_data][images][0]"),
                item.img.clone(),
            ));
        }

        let response = self
            .http
            .post(format!("{BASE_URL}/checkout/sessions"))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession = response.json().await?;
        Ok(session.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::CartProductView;

    fn view(name: &str, price: f64, img: &str, quantity: i32) -> CartItemView {
        CartItemView {
            id: 1,
            quantity,
            product: CartProductView {
                name: name.to_string(),
                price,
                img: img.to_string(),
            },
        }
    }

    #[test]
    fn test_line_items_use_minor_units() {
        let items = build_line_items(&[view("Widget", 10.0, "a.png", 2)]);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Widget");
        assert_eq!(items[0].img, "a.png");
        assert_eq!(items[0].unit_amount, 1000);
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn test_line_items_round_fractional_cents() {
        let items = build_line_items(&[view("Gadget", 19.99, "g.png", 1)]);
        assert_eq!(items[0].unit_amount, 1999);
    }

    #[test]
    fn test_empty_cart_builds_no_line_items() {
        assert!(build_line_items(&[]).is_empty());
    }
}
