//! API Client

use async_trait::async_trait;
use pay_core::wire::{CreatePaymentIntentRequest, CreatePaymentIntentResponse, MessageResponse};
use pay_core::{ClientSecret, CollectorError, IntentIssuer, PaymentRequest};

/// Intent issuer backed by the payment server's HTTP API
pub struct HttpIssuer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpIssuer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl IntentIssuer for HttpIssuer {
    async fn create_intent(&self, request: &PaymentRequest) -> pay_core::Result<ClientSecret> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&CreatePaymentIntentRequest::from(request))
            .send()
            .await
            .map_err(|e| CollectorError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let data: CreatePaymentIntentResponse = response
                .json()
                .await
                .map_err(|_| CollectorError::MissingSecret)?;
            Ok(data.client_secret)
        } else {
            let data = response
                .json::<MessageResponse>()
                .await
                .unwrap_or_else(|_| MessageResponse::new("Request failed"));
            Err(CollectorError::Rejected {
                status: status.as_u16(),
                message: data.message,
            })
        }
    }
}
