use crate::api::serde_util::{opt_u64_lenient, string_lenient, u64_lenient};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Account balance (`balance`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub balance: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Conversion rates (`rates`), keyed by method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rates {
    /// Rates applied to incoming payments
    #[serde(rename = "in")]
    pub incoming: BTreeMap<String, Decimal>,
    /// Rates applied to payouts
    pub out: BTreeMap<String, Decimal>,
}

/// Commission per payment method for a project (`commissions`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commissions {
    pub by_method: BTreeMap<String, Decimal>,
}

impl Commissions {
    pub fn get(&self, method: &str) -> Option<Decimal> {
        self.by_method.get(method).copied()
    }
}

/// Bill returned by `create-payment`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    #[serde(deserialize_with = "u64_lenient::deserialize")]
    pub pay_id: u64,
    #[serde(default, deserialize_with = "opt_u64_lenient::deserialize")]
    pub transaction_id: Option<u64>,
    #[serde(default = "waiting")]
    pub status: String,
    pub payment_url: String,
}

fn waiting() -> String {
    "waiting".to_string()
}

/// Incoming payment (`payments`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(deserialize_with = "u64_lenient::deserialize")]
    pub transaction_id: u64,
    #[serde(deserialize_with = "u64_lenient::deserialize")]
    pub pay_id: u64,
    pub status: String,
    pub method: String,
    pub amount: Decimal,
    pub currency: String,
    pub profit: Decimal,
    pub email: String,
    pub desc: String,
    pub date: String,
    #[serde(default)]
    pub pay_date: Option<String>,
}

impl Payment {
    pub fn is_paid(&self) -> bool {
        self.status == "paid"
    }
}

/// Payout (`create-payout`, `payouts`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    #[serde(deserialize_with = "u64_lenient::deserialize")]
    pub transaction_id: u64,
    #[serde(deserialize_with = "u64_lenient::deserialize")]
    pub payout_id: u64,
    pub payout_type: String,
    pub status: String,
    pub amount: Decimal,
    pub commission: Decimal,
    pub commission_type: String,
    /// Exchange rate applied to the payout
    #[serde(default)]
    pub rate: Option<Decimal>,
    #[serde(deserialize_with = "string_lenient::deserialize")]
    pub wallet: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub complete_date: Option<String>,
}

/// Addresses AnyPay sends payment notifications from (`ip-notification`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceIps {
    pub ips: Vec<String>,
}

impl ServiceIps {
    /// Check whether a notification's source address belongs to AnyPay
    pub fn contains(&self, ip: &str) -> bool {
        self.ips.iter().any(|known| known == ip)
    }
}
