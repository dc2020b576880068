//! Request bodies for the product endpoints.
//!
//! Fields arrive as raw JSON values so that a missing field, a wrong type or
//! an unparsable price comes back as a 422 with per-field details instead of
//! a bare 400 from the JSON extractor. Only a body that is not a JSON object
//! at all is rejected up front.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use stockroom_core::validation::{parse_price, validate_draft};
use stockroom_core::{Money, ProductDraft, ProductPatch, ValidationError, ValidationErrors};

/// Reads a text field: `null` or absent is `None`, anything but a string is
/// a field error.
fn text_field(field: &str, value: Option<Value>) -> Result<Option<String>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected a string".to_string(),
        }),
    }
}

/// Reads `price` as sent by clients: `9.99` or `"9.99"`. Both go through the
/// same decimal parser.
fn price_field(value: Option<Value>) -> Option<Result<Money, ValidationError>> {
    match value? {
        Value::Null => None,
        Value::Number(n) => Some(parse_price(&n.to_string())),
        Value::String(s) => Some(parse_price(&s)),
        _ => Some(Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "expected a number or a decimal string".to_string(),
        })),
    }
}

/// Body of `POST /products` and `PUT /products/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductBody {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub sku: Option<Value>,
}

impl ProductBody {
    /// Builds the draft, reporting every field problem at once.
    pub fn into_draft(self) -> Result<ProductDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let mut text = |field: &str, value: Option<Value>| match text_field(field, value) {
            Ok(v) => v,
            Err(e) => {
                errors.push(e);
                None
            }
        };
        let name = text("name", self.name);
        let category = text("category", self.category);
        let sku = text("sku", self.sku);

        let price = match price_field(self.price) {
            Some(Ok(price)) => price,
            Some(Err(e)) => {
                errors.push(e);
                Money::zero()
            }
            None => {
                errors.push(ValidationError::Required {
                    field: "price".to_string(),
                });
                Money::zero()
            }
        };

        let draft = ProductDraft {
            name: name.unwrap_or_default(),
            category,
            price,
            sku,
        }
        .normalized();

        // A field that already failed its type check is not reported twice
        if let Err(field_errors) = validate_draft(&draft) {
            for e in field_errors {
                if !errors.has_field(e.field()) {
                    errors.push(e);
                }
            }
        }

        errors.into_result().map(|()| draft)
    }
}

/// Body of `PATCH /products/{id}`.
///
/// ```text
/// field absent          → keep
/// "category": null      → clear   (category, sku only)
/// "category": "Tools"   → set
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatchBody {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<Value>>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub sku: Option<Option<Value>>,
}

impl ProductPatchBody {
    /// Converts to a patch. Field types and the price are checked here; the
    /// store validates the merged record.
    pub fn into_patch(self) -> Result<ProductPatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = text_field("name", self.name).unwrap_or_else(|e| {
            errors.push(e);
            None
        });
        let category = self
            .category
            .map(|v| text_field("category", v))
            .transpose()
            .unwrap_or_else(|e| {
                errors.push(e);
                None
            });
        let sku = self
            .sku
            .map(|v| text_field("sku", v))
            .transpose()
            .unwrap_or_else(|e| {
                errors.push(e);
                None
            });
        let price = price_field(self.price).transpose().unwrap_or_else(|e| {
            errors.push(e);
            None
        });

        errors.into_result().map(|()| ProductPatch {
            name,
            category,
            price,
            sku,
        })
    }
}

/// Marks a field that appeared in the body, even as `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query string of `GET /products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
}
