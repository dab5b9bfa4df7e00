//! Transaction submission entities.
//! Transient, per-request shapes of an inbound partner submission and its pricing.

use serde::{Deserialize, Deserializer, Serialize};

/// A partner's transaction submission as decoded from the wire.
///
/// String fields tolerate being absent or `null`; both decode to an empty
/// string so that the field presence check can report them by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    #[serde(rename = "partnerkey", default, deserialize_with = "nullable_string")]
    pub partner_key: String,
    #[serde(rename = "partnerrefno", default, deserialize_with = "nullable_string")]
    pub partner_ref_no: String,
    #[serde(rename = "partnerpassword", default, deserialize_with = "nullable_string")]
    pub partner_password: String,
    #[serde(rename = "totalamount", default)]
    pub total_amount: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub sig: String,
}

/// One line of a submission. Amounts are in minor currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "partneritemref", default, deserialize_with = "nullable_string")]
    pub partner_item_ref: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(rename = "qty", default)]
    pub quantity: i64,
    #[serde(rename = "unitprice", default)]
    pub unit_price: i64,
}

/// Outcome of the discount engine for an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingResult {
    pub total_amount: i64,
    pub discount_amount: i64,
    pub final_amount: i64,
}

/// Wire body returned to the partner. `result` is 1 on success, 0 on rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub result: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resultmessage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totalamount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totaldiscount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalamount: Option<i64>,
}

impl LineItem {
    pub fn new(
        partner_item_ref: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        unit_price: i64,
    ) -> Self {
        Self {
            partner_item_ref: partner_item_ref.into(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// `quantity × unit_price`, widened so that no pair of i64 inputs can overflow.
    pub fn subtotal(&self) -> i128 {
        i128::from(self.quantity) * i128::from(self.unit_price)
    }
}

impl PricingResult {
    pub fn new(total_amount: i64, discount_amount: i64) -> Self {
        Self {
            total_amount,
            discount_amount,
            final_amount: total_amount - discount_amount,
        }
    }
}

impl SubmitResponse {
    pub fn accepted(pricing: PricingResult) -> Self {
        Self {
            result: 1,
            resultmessage: None,
            totalamount: Some(pricing.total_amount),
            totaldiscount: Some(pricing.discount_amount),
            finalamount: Some(pricing.final_amount),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            result: 0,
            resultmessage: Some(message.into()),
            totalamount: None,
            totaldiscount: None,
            finalamount: None,
        }
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
