use crate::api::endpoints::Endpoint;
use crate::api::requests::{
    CreatePayment, CreatePayout, GetCommissions, GetPayments, GetPayouts, IntoParams,
};
use crate::api::response::{self, FromResult};
use crate::api::types::{Balance, Bill, Commissions, Payment, Payout, Rates, ServiceIps};
use crate::core::config::AnyPayConfig;
use crate::core::errors::AnyPayError;
use crate::core::kernel::{DigestSigner, ReqwestRest, RestClient, Signer};
use crate::core::types::Params;
use std::sync::Arc;
use tracing::{debug, instrument};

/// AnyPay API client
///
/// Every method is one independent signed request: normalize the
/// arguments, sign them, send them once, classify the answer. Nothing is
/// cached or retried and the client holds no mutable state, so it can be
/// shared across tasks freely.
pub struct AnyPayClient<R: RestClient = ReqwestRest> {
    rest: R,
    signer: Arc<dyn Signer>,
    config: AnyPayConfig,
}

impl<R: RestClient> AnyPayClient<R> {
    /// Create a client over an existing transport
    ///
    /// No request is made; see [`AnyPayClient::validate_credentials`].
    pub fn new(rest: R, config: AnyPayConfig) -> Self {
        let signer = Arc::new(DigestSigner::from_config(&config));
        Self {
            rest,
            signer,
            config,
        }
    }

    /// Replace the signer, e.g. to sign with a custom digest
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = signer;
        self
    }

    pub fn config(&self) -> &AnyPayConfig {
        &self.config
    }

    pub fn rest(&self) -> &R {
        &self.rest
    }

    /// Check the credentials with one balance call.
    ///
    /// A provider rejection becomes [`AnyPayError::Configuration`]; transport
    /// failures are returned unchanged.
    #[instrument(skip(self), fields(provider = "anypay"))]
    pub async fn validate_credentials(&self) -> Result<(), AnyPayError> {
        match self.get_balance().await {
            Ok(_) => Ok(()),
            Err(AnyPayError::Api { code, message }) => Err(AnyPayError::Configuration(format!(
                "credentials rejected by AnyPay: [{}] {}",
                code, message
            ))),
            Err(e) => Err(e),
        }
    }

    /// Normalize and sign a request without sending it
    pub fn signed_params<Q: IntoParams>(&self, request: Q) -> Result<Params, AnyPayError> {
        let params = request.into_params(self.config.project_id)?;
        Ok(self.sign(Q::ENDPOINT, params))
    }

    fn sign(&self, endpoint: Endpoint, mut params: Params) -> Params {
        let sign = self
            .signer
            .sign(endpoint.name(), endpoint.signed_fields(), &params);
        params.push("sign", sign);
        params
    }

    async fn execute<T: FromResult>(
        &self,
        endpoint: Endpoint,
        params: Params,
    ) -> Result<T, AnyPayError> {
        let params = self.sign(endpoint, params);
        let path = endpoint.path(self.config.api_id());

        debug!(endpoint = %endpoint, param_count = params.len(), "sending request");
        let body = self
            .rest
            .send(endpoint.http_method(), &path, &params)
            .await?;

        response::decode(endpoint, body)
    }

    async fn call<Q: IntoParams, T: FromResult>(&self, request: Q) -> Result<T, AnyPayError> {
        let params = request.into_params(self.config.project_id)?;
        self.execute(Q::ENDPOINT, params).await
    }

    /// Get account balance
    #[instrument(skip(self), fields(provider = "anypay"))]
    pub async fn get_balance(&self) -> Result<Balance, AnyPayError> {
        self.execute(Endpoint::Balance, Params::new()).await
    }

    /// Get conversion rates for incoming payments and payouts
    #[instrument(skip(self), fields(provider = "anypay"))]
    pub async fn get_rates(&self) -> Result<Rates, AnyPayError> {
        self.execute(Endpoint::Rates, Params::new()).await
    }

    /// Get per-method commissions of a project
    #[instrument(skip(self), fields(provider = "anypay"))]
    pub async fn get_commissions(
        &self,
        request: GetCommissions,
    ) -> Result<Commissions, AnyPayError> {
        self.call(request).await
    }

    /// Get the addresses payment notifications are sent from
    #[instrument(skip(self), fields(provider = "anypay"))]
    pub async fn get_service_ips(&self) -> Result<ServiceIps, AnyPayError> {
        self.execute(Endpoint::ServiceIps, Params::new()).await
    }

    /// Create a payment and return the bill to send the customer to
    #[instrument(skip(self, request), fields(provider = "anypay", pay_id = ?request.pay_id))]
    pub async fn create_payment(&self, request: CreatePayment) -> Result<Bill, AnyPayError> {
        self.call(request).await
    }

    /// List payments of a project
    #[instrument(skip(self), fields(provider = "anypay"))]
    pub async fn get_payments(&self, request: GetPayments) -> Result<Vec<Payment>, AnyPayError> {
        self.call(request).await
    }

    /// Send money from the account balance
    #[instrument(skip(self, request), fields(provider = "anypay", payout_id = ?request.payout_id))]
    pub async fn create_payout(&self, request: CreatePayout) -> Result<Payout, AnyPayError> {
        self.call(request).await
    }

    /// List payouts
    #[instrument(skip(self), fields(provider = "anypay"))]
    pub async fn get_payouts(&self, request: GetPayouts) -> Result<Vec<Payout>, AnyPayError> {
        self.call(request).await
    }
}

impl<R: RestClient> std::fmt::Debug for AnyPayClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyPayClient")
            .field("project_id", &self.config.project_id)
            .field("use_md5", &self.config.use_md5)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::HttpMethod;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    struct Canned(Value);

    #[async_trait]
    impl RestClient for Canned {
        async fn send(
            &self,
            _method: HttpMethod,
            _endpoint: &str,
            _params: &Params,
        ) -> Result<Value, AnyPayError> {
            Ok(self.0.clone())
        }
    }

    fn client(body: Value) -> AnyPayClient<Canned> {
        AnyPayClient::new(
            Canned(body),
            AnyPayConfig::new("1234".to_string(), "secret".to_string()).project_id(7),
        )
    }

    #[test]
    fn test_signed_params_append_sign_last() {
        let params = client(Value::Null)
            .signed_params(GetCommissions::new())
            .unwrap();

        let names: Vec<_> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["project_id", "sign"]);
        assert_eq!(params.get("sign").map(str::len), Some(64));
    }

    struct FixedSigner;

    impl Signer for FixedSigner {
        fn sign(&self, method: &str, signed_fields: &[&str], _params: &Params) -> String {
            format!("{}:{}", method, signed_fields.join(","))
        }
    }

    #[test]
    fn test_custom_signer_fills_sign() {
        let params = client(Value::Null)
            .with_signer(Arc::new(FixedSigner))
            .signed_params(GetCommissions::new())
            .unwrap();
        assert_eq!(params.get("sign"), Some("commissions:project_id"));
    }

    #[test]
    fn test_md5_config_switches_digest() {
        let client = AnyPayClient::new(
            Canned(Value::Null),
            AnyPayConfig::new("1234".to_string(), "secret".to_string()).use_md5(true),
        );
        let params = client.signed_params(GetPayouts::new()).unwrap();
        assert_eq!(params.get("sign"), Some("3350a9fda700ead85291c99e5d82f132"));
    }

    #[test]
    fn test_commissions_signature() {
        let params = client(Value::Null)
            .signed_params(GetCommissions::new())
            .unwrap();
        assert_eq!(
            params.get("sign"),
            Some("1483939ca641d8f41d2bac0e0cfb2868e79572c7b01601e0f90a4a140c3950b8")
        );
    }

    #[tokio::test]
    async fn test_validate_credentials_maps_rejection() {
        let err = client(json!({"error": {"code": 1, "message": "Invalid API key"}}))
            .validate_credentials()
            .await
            .unwrap_err();

        assert!(matches!(err, AnyPayError::Configuration(_)));
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn test_validate_credentials_accepts_balance() {
        client(json!({"result": {"balance": 0}}))
            .validate_credentials()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_create_payout_decodes_result() {
        let payout = client(json!({"result": {
            "transaction_id": 501,
            "payout_id": 5,
            "payout_type": "card",
            "status": "in_process",
            "amount": "100.00",
            "commission": "3.00",
            "commission_type": "payment",
            "wallet": "4100000000000000"
        }}))
        .create_payout(
            CreatePayout::new()
                .payout_id(5)
                .payout_type("card")
                .amount(Decimal::from(100))
                .wallet("4100000000000000"),
        )
        .await
        .unwrap();

        assert_eq!(payout.transaction_id, 501);
        assert_eq!(payout.status, "in_process");
    }
}
