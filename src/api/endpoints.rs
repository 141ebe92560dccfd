use crate::core::types::HttpMethod;

/// Every AnyPay API method this crate speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Balance,
    Rates,
    Commissions,
    ServiceIps,
    CreatePayment,
    Payments,
    CreatePayout,
    Payouts,
}

impl Endpoint {
    /// Method name as used in the URL and as the signature prefix
    pub const fn name(self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::Rates => "rates",
            Self::Commissions => "commissions",
            Self::ServiceIps => "ip-notification",
            Self::CreatePayment => "create-payment",
            Self::Payments => "payments",
            Self::CreatePayout => "create-payout",
            Self::Payouts => "payouts",
        }
    }

    pub const fn http_method(self) -> HttpMethod {
        match self {
            Self::CreatePayment | Self::CreatePayout => HttpMethod::Post,
            _ => HttpMethod::Get,
        }
    }

    /// Parameters covered by the signature, in the order the provider
    /// concatenates them. Must match https://anypay.io/doc/api exactly.
    pub const fn signed_fields(self) -> &'static [&'static str] {
        match self {
            Self::Balance | Self::Rates | Self::ServiceIps | Self::Payouts => &[],
            Self::Commissions | Self::Payments => &["project_id"],
            Self::CreatePayment => &[
                "project_id",
                "pay_id",
                "amount",
                "currency",
                "desc",
                "method",
            ],
            Self::CreatePayout => &["payout_id", "payout_type", "amount", "wallet"],
        }
    }

    /// Path relative to the base URL: `/<method>/<api_id>`
    pub fn path(self, api_id: &str) -> String {
        format!("/{}/{}", self.name(), api_id)
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
