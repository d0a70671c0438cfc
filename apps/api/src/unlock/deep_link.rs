//! UPI payment deep link and the QR image request that embeds it.

use anyhow::{Context, Result};
use serde::Serialize;
use url::form_urlencoded;
use url::Url;

use crate::config::PayeeConfig;

/// Everything the payer's app needs to prefill a transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub payee_address: String,
    pub payee_name: String,
    pub amount: f64,
    pub currency: String,
    pub note: String,
}

impl PaymentRequest {
    /// Builds the request for unlocking `item_name` from the static payee config.
    pub fn for_item(payee: &PayeeConfig, item_name: &str) -> Self {
        PaymentRequest {
            payee_address: payee.address.clone(),
            payee_name: payee.name.clone(),
            amount: payee.unlock_price,
            currency: payee.currency.clone(),
            note: format!("Unlock {item_name}"),
        }
    }
}

/// `upi://pay?pa=..&pn=..&am=..&cu=..&tn=..`, every value form-encoded.
pub fn deep_link(request: &PaymentRequest) -> String {
    let amount = format!("{:.2}", request.amount);
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("pa", &request.payee_address)
        .append_pair("pn", &request.payee_name)
        .append_pair("am", &amount)
        .append_pair("cu", &request.currency)
        .append_pair("tn", &request.note)
        .finish();
    format!("upi://pay?{query}")
}

/// Image URL for a QR code of `link`, served by the third-party `endpoint`.
pub fn qr_image_url(endpoint: &str, size: u32, link: &str) -> Result<String> {
    let mut url =
        Url::parse(endpoint).with_context(|| format!("QR endpoint '{endpoint}' is not a URL"))?;
    url.query_pairs_mut()
        .append_pair("size", &format!("{size}x{size}"))
        .append_pair("data", link);
    Ok(url.into())
}

/// Deep link plus the QR image URL, as shown in the unlock dialog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentPrompt {
    pub request: PaymentRequest,
    pub deep_link: String,
    pub qr_image_url: String,
}

impl PaymentPrompt {
    pub fn build(payee: &PayeeConfig, item_name: &str) -> Result<Self> {
        let request = PaymentRequest::for_item(payee, item_name);
        let link = deep_link(&request);
        let qr = qr_image_url(&payee.qr_endpoint, payee.qr_size, &link)?;
        Ok(PaymentPrompt {
            request,
            deep_link: link,
            qr_image_url: qr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payee() -> PayeeConfig {
        PayeeConfig {
            address: "shop@okbank".to_string(),
            name: "Colour Shop".to_string(),
            unlock_price: 10.0,
            currency: "INR".to_string(),
            qr_endpoint: "https://qr.example.com/v1/create/".to_string(),
            qr_size: 200,
        }
    }

    #[test]
    fn test_deep_link_parameter_order_and_encoding() {
        let request = PaymentRequest::for_item(&payee(), "Ocean Blue");
        assert_eq!(
            deep_link(&request),
            "upi://pay?pa=shop%40okbank&pn=Colour+Shop&am=10.00&cu=INR&tn=Unlock+Ocean+Blue"
        );
    }

    #[test]
    fn test_deep_link_escapes_reserved_characters() {
        let mut request = PaymentRequest::for_item(&payee(), "A&B=C");
        request.amount = 5.5;
        let link = deep_link(&request);
        assert!(link.contains("am=5.50"));
        assert!(link.contains("tn=Unlock+A%26B%3DC"));
    }

    #[test]
    fn test_qr_url_embeds_encoded_link() {
        let link = "upi://pay?pa=shop%40okbank&am=10.00";
        let url = qr_image_url("https://qr.example.com/v1/create/", 200, link).unwrap();
        assert!(url.starts_with("https://qr.example.com/v1/create/?size=200x200&data="));

        let parsed = Url::parse(&url).unwrap();
        let data = parsed
            .query_pairs()
            .find(|(k, _)| k == "data")
            .map(|(_, v)| v.into_owned());
        assert_eq!(data.as_deref(), Some(link));
    }

    #[test]
    fn test_qr_url_rejects_bad_endpoint() {
        assert!(qr_image_url("not a url", 100, "upi://pay").is_err());
    }

    #[test]
    fn test_prompt_uses_item_name_in_note() {
        let prompt = PaymentPrompt::build(&payee(), "Sunset Orange").unwrap();
        assert_eq!(prompt.request.note, "Unlock Sunset Orange");
        assert!(prompt.deep_link.starts_with("upi://pay?"));
        assert!(prompt.qr_image_url.contains("data=upi%3A%2F%2Fpay"));
    }
}
