use crate::api::endpoints::Endpoint;
use crate::core::errors::AnyPayError;
use crate::core::types::Params;
use rust_decimal::Decimal;

/// Currency used for payments when the caller does not pick one
pub const DEFAULT_CURRENCY: &str = "RUB";

/// Turns a request into the exact ordered parameter set an endpoint expects.
///
/// Optional fields are emitted only when set; a set `0` or `""` is still
/// emitted. Missing required fields fail before anything touches the network.
pub trait IntoParams {
    const ENDPOINT: Endpoint;

    fn into_params(self, default_project_id: Option<u64>) -> Result<Params, AnyPayError>;
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, AnyPayError> {
    value.ok_or_else(|| AnyPayError::validation(format!("missing required parameter `{}`", name)))
}

fn required_text(value: Option<String>, name: &str) -> Result<String, AnyPayError> {
    let value = required(value, name)?;
    if value.trim().is_empty() {
        return Err(AnyPayError::validation(format!(
            "parameter `{}` must not be empty",
            name
        )));
    }
    Ok(value)
}

fn positive_amount(value: Option<Decimal>) -> Result<Decimal, AnyPayError> {
    let amount = required(value, "amount")?;
    if amount <= Decimal::ZERO {
        return Err(AnyPayError::validation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(amount)
}

fn project_id(explicit: Option<u64>, default: Option<u64>) -> Result<u64, AnyPayError> {
    explicit.or(default).ok_or_else(|| {
        AnyPayError::validation(
            "missing required parameter `project_id` and no default project is configured",
        )
    })
}

/// Where the payout commission is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommissionType {
    Payment,
    Balance,
}

impl CommissionType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Balance => "balance",
        }
    }
}

/// Request for `commissions`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetCommissions {
    pub project_id: Option<u64>,
}

impl GetCommissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_id(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }
}

impl IntoParams for GetCommissions {
    const ENDPOINT: Endpoint = Endpoint::Commissions;

    fn into_params(self, default_project_id: Option<u64>) -> Result<Params, AnyPayError> {
        let mut params = Params::new();
        params.push("project_id", project_id(self.project_id, default_project_id)?);
        Ok(params)
    }
}

/// Request for `create-payment`: issues a bill the customer pays through `payment_url`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePayment {
    pub project_id: Option<u64>,
    pub pay_id: Option<u64>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub desc: Option<String>,
    pub method: Option<String>,
    pub method_currency: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Last four digits of the card, `card` method only
    pub tail: Option<String>,
    pub success_url: Option<String>,
    pub fail_url: Option<String>,
    /// Bill page language
    pub lang: Option<String>,
}

impl CreatePayment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_id(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn pay_id(mut self, pay_id: u64) -> Self {
        self.pay_id = Some(pay_id);
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn method_currency(mut self, method_currency: impl Into<String>) -> Self {
        self.method_currency = Some(method_currency.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    pub fn success_url(mut self, success_url: impl Into<String>) -> Self {
        self.success_url = Some(success_url.into());
        self
    }

    pub fn fail_url(mut self, fail_url: impl Into<String>) -> Self {
        self.fail_url = Some(fail_url.into());
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

impl IntoParams for CreatePayment {
    const ENDPOINT: Endpoint = Endpoint::CreatePayment;

    fn into_params(self, default_project_id: Option<u64>) -> Result<Params, AnyPayError> {
        let project_id = project_id(self.project_id, default_project_id)?;
        let pay_id = required(self.pay_id, "pay_id")?;
        let amount = positive_amount(self.amount)?;
        let desc = required_text(self.desc, "desc")?;
        let method = required_text(self.method, "method")?;
        let email = required_text(self.email, "email")?;
        if !email.contains('@') {
            return Err(AnyPayError::validation(format!(
                "email `{}` is not an address",
                email
            )));
        }

        let mut params = Params::new();
        params.push("project_id", project_id);
        params.push("pay_id", pay_id);
        params.push("amount", amount);
        params.push(
            "currency",
            self.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        );
        params.push("desc", desc);
        params.push("method", method);
        params.push_opt("method_currency", self.method_currency);
        params.push("email", email);
        params.push_opt("phone", self.phone);
        params.push_opt("tail", self.tail);
        params.push_opt("success_url", self.success_url);
        params.push_opt("fail_url", self.fail_url);
        params.push_opt("lang", self.lang);
        Ok(params)
    }
}

/// Request for `payments`: lists a project's payments, optionally filtered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPayments {
    pub project_id: Option<u64>,
    pub transaction_id: Option<u64>,
    pub pay_id: Option<u64>,
    pub offset: Option<u64>,
}

impl GetPayments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_id(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn transaction_id(mut self, transaction_id: u64) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    pub fn pay_id(mut self, pay_id: u64) -> Self {
        self.pay_id = Some(pay_id);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl IntoParams for GetPayments {
    const ENDPOINT: Endpoint = Endpoint::Payments;

    fn into_params(self, default_project_id: Option<u64>) -> Result<Params, AnyPayError> {
        let mut params = Params::new();
        params.push("project_id", project_id(self.project_id, default_project_id)?);
        params.push_opt("transaction_id", self.transaction_id);
        params.push_opt("pay_id", self.pay_id);
        params.push("offset", self.offset.unwrap_or(0));
        Ok(params)
    }
}

/// Request for `create-payout`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatePayout {
    pub payout_id: Option<u64>,
    /// Payout system, e.g. `card`, `qiwi`, `ym`
    pub payout_type: Option<String>,
    pub amount: Option<Decimal>,
    pub wallet: Option<String>,
    pub wallet_currency: Option<String>,
    pub commission_type: Option<CommissionType>,
    pub status_url: Option<String>,
}

impl CreatePayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payout_id(mut self, payout_id: u64) -> Self {
        self.payout_id = Some(payout_id);
        self
    }

    pub fn payout_type(mut self, payout_type: impl Into<String>) -> Self {
        self.payout_type = Some(payout_type.into());
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn wallet(mut self, wallet: impl Into<String>) -> Self {
        self.wallet = Some(wallet.into());
        self
    }

    pub fn wallet_currency(mut self, wallet_currency: impl Into<String>) -> Self {
        self.wallet_currency = Some(wallet_currency.into());
        self
    }

    pub fn commission_type(mut self, commission_type: CommissionType) -> Self {
        self.commission_type = Some(commission_type);
        self
    }

    pub fn status_url(mut self, status_url: impl Into<String>) -> Self {
        self.status_url = Some(status_url.into());
        self
    }
}

impl IntoParams for CreatePayout {
    const ENDPOINT: Endpoint = Endpoint::CreatePayout;

    fn into_params(self, _default_project_id: Option<u64>) -> Result<Params, AnyPayError> {
        let payout_id = required(self.payout_id, "payout_id")?;
        let payout_type = required_text(self.payout_type, "payout_type")?;
        let amount = positive_amount(self.amount)?;
        let wallet = required_text(self.wallet, "wallet")?;

        let mut params = Params::new();
        params.push("payout_id", payout_id);
        params.push("payout_type", payout_type);
        params.push("amount", amount);
        params.push("wallet", wallet);
        params.push_opt("wallet_currency", self.wallet_currency);
        params.push_opt(
            "commission_type",
            self.commission_type.map(CommissionType::as_str),
        );
        params.push_opt("status_url", self.status_url);
        Ok(params)
    }
}

/// Request for `payouts`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetPayouts {
    pub transaction_id: Option<u64>,
    pub payout_id: Option<u64>,
    pub offset: Option<u64>,
}

impl GetPayouts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transaction_id(mut self, transaction_id: u64) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    pub fn payout_id(mut self, payout_id: u64) -> Self {
        self.payout_id = Some(payout_id);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl IntoParams for GetPayouts {
    const ENDPOINT: Endpoint = Endpoint::Payouts;

    fn into_params(self, _default_project_id: Option<u64>) -> Result<Params, AnyPayError> {
        let mut params = Params::new();
        params.push_opt("transaction_id", self.transaction_id);
        params.push_opt("payout_id", self.payout_id);
        params.push("offset", self.offset.unwrap_or(0));
        Ok(params)
    }
}
