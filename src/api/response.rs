use crate::api::endpoints::Endpoint;
use crate::api::serde_util::i64_lenient;
use crate::api::types::{Payment, Payout};
use crate::core::errors::AnyPayError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(deserialize_with = "i64_lenient::deserialize")]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Decoding of a successful `result` payload into a typed model
pub trait FromResult: Sized {
    fn from_result(endpoint: Endpoint, result: Value) -> Result<Self, AnyPayError>;
}

/// Split a decoded body into its `result` payload or the provider error.
///
/// `error` wins when a body carries both keys.
pub fn classify(endpoint: Endpoint, body: Value) -> Result<Value, AnyPayError> {
    let mut object = match body {
        Value::Object(object) => object,
        other => {
            return Err(AnyPayError::validation(format!(
                "{}: expected a JSON object, got {}",
                endpoint,
                json_kind(&other)
            )))
        }
    };

    if let Some(error) = object.remove("error") {
        let error: ErrorBody = serde_json::from_value(error).map_err(|e| {
            AnyPayError::validation(format!("{}: malformed error object: {}", endpoint, e))
        })?;
        return Err(AnyPayError::Api {
            code: error.code,
            message: error.message,
        });
    }

    object.remove("result").ok_or_else(|| {
        AnyPayError::validation(format!(
            "{}: response has neither `result` nor `error`",
            endpoint
        ))
    })
}

/// Classify a body and map its `result` onto `T`
pub fn decode<T: FromResult>(endpoint: Endpoint, body: Value) -> Result<T, AnyPayError> {
    let result = classify(endpoint, body)?;
    T::from_result(endpoint, result)
}

/// Single-object results go straight through serde
pub fn decode_object<T: DeserializeOwned>(
    endpoint: Endpoint,
    result: Value,
) -> Result<T, AnyPayError> {
    serde_json::from_value(result).map_err(|e| {
        AnyPayError::validation(format!("{}: malformed result: {}", endpoint, e))
    })
}

/// Decode the list stored under `key`.
///
/// The provider returns either an array or an object keyed by transaction
/// id. Every element must decode; one bad element fails the whole list.
pub fn decode_list<T: DeserializeOwned>(
    endpoint: Endpoint,
    mut result: Value,
    key: &str,
) -> Result<Vec<T>, AnyPayError> {
    let container = match result.get_mut(key) {
        Some(container) => container.take(),
        None => {
            return Err(AnyPayError::validation(format!(
                "{}: result is missing `{}`",
                endpoint, key
            )))
        }
    };

    let elements: Vec<(String, Value)> = match container {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        // Provider order is the paging order, `preserve_order` keeps it
        Value::Object(items) => items.into_iter().collect(),
        // Empty listings come back as null or an empty string
        Value::Null => Vec::new(),
        Value::String(ref text) if text.is_empty() => Vec::new(),
        other => {
            return Err(AnyPayError::validation(format!(
                "{}: `{}` must be a list, got {}",
                endpoint,
                key,
                json_kind(&other)
            )))
        }
    };

    elements
        .into_iter()
        .map(|(position, item)| {
            serde_json::from_value(item).map_err(|e| {
                AnyPayError::validation(format!(
                    "{}: malformed `{}` entry {}: {}",
                    endpoint, key, position, e
                ))
            })
        })
        .collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

macro_rules! object_result {
    ($($model:ty),+ $(,)?) => {
        $(
            impl FromResult for $model {
                fn from_result(endpoint: Endpoint, result: Value) -> Result<Self, AnyPayError> {
                    decode_object(endpoint, result)
                }
            }
        )+
    };
}

object_result!(
    crate::api::types::Balance,
    crate::api::types::Rates,
    crate::api::types::Commissions,
    crate::api::types::Bill,
    crate::api::types::Payout,
    crate::api::types::ServiceIps,
);

impl FromResult for Vec<Payment> {
    fn from_result(endpoint: Endpoint, result: Value) -> Result<Self, AnyPayError> {
        decode_list(endpoint, result, "payments")
    }
}

impl FromResult for Vec<Payout> {
    fn from_result(endpoint: Endpoint, result: Value) -> Result<Self, AnyPayError> {
        decode_list(endpoint, result, "payouts")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Balance;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn payment(pay_id: u64) -> Value {
        json!({
            "transaction_id": pay_id + 9000,
            "pay_id": pay_id,
            "status": "paid",
            "method": "card",
            "amount": "1500.50",
            "currency": "RUB",
            "profit": "1447.98",
            "email": "buyer@example.com",
            "desc": "Order",
            "date": "01.10.2026 12:00:00",
            "pay_date": "01.10.2026 12:05:00"
        })
    }

    #[test]
    fn test_error_object_becomes_api_error() {
        let err = decode::<Balance>(
            Endpoint::Balance,
            json!({"error": {"code": 401, "message": "Invalid api_id"}}),
        )
        .unwrap_err();

        match err {
            AnyPayError::Api { code, message } => {
                assert_eq!(code, 401);
                assert_eq!(message, "Invalid api_id");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_code_as_string() {
        let err = classify(
            Endpoint::Payments,
            json!({"error": {"code": "14", "message": "Project not found"}}),
        )
        .unwrap_err();
        assert_eq!(err.api_code(), Some(14));
    }

    #[test]
    fn test_missing_discriminator_is_validation_error() {
        let err = classify(Endpoint::Balance, json!({"status": "ok"})).unwrap_err();
        assert!(err.is_validation());

        let err = classify(Endpoint::Balance, json!([1, 2])).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_single_object_mapping() {
        let balance: Balance = decode(
            Endpoint::Balance,
            json!({"result": {"balance": "123.45", "currency": "RUB"}}),
        )
        .unwrap();
        assert_eq!(balance.balance, Decimal::from_str("123.45").unwrap());
        assert_eq!(balance.currency.as_deref(), Some("RUB"));
    }

    #[test]
    fn test_single_object_missing_field() {
        let err = decode::<Balance>(Endpoint::Balance, json!({"result": {"currency": "RUB"}}))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_list_from_keyed_object() {
        let payments: Vec<Payment> = decode(
            Endpoint::Payments,
            json!({"result": {"total": 2, "payments": {"9001": payment(1), "9002": payment(2)}}}),
        )
        .unwrap();

        assert_eq!(payments.len(), 2);
        assert!(payments.iter().all(Payment::is_paid));
    }

    #[test]
    fn test_keyed_list_keeps_provider_order() {
        let payments: Vec<Payment> = decode(
            Endpoint::Payments,
            json!({"result": {"payments": {"9": payment(9), "10": payment(10), "11": payment(11)}}}),
        )
        .unwrap();

        let ids: Vec<_> = payments.iter().map(|p| p.pay_id).collect();
        assert_eq!(ids, vec![9, 10, 11]);
    }

    #[test]
    fn test_list_fails_on_first_malformed_element() {
        let err = decode::<Vec<Payment>>(
            Endpoint::Payments,
            json!({"result": {"payments": [payment(1), {"pay_id": "bad"}]}}),
        )
        .unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn test_empty_listing() {
        let payouts: Vec<Payout> =
            decode(Endpoint::Payouts, json!({"result": {"payouts": null}})).unwrap();
        assert!(payouts.is_empty());
    }
}
