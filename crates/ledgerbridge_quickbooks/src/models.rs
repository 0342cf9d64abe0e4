// --- File: crates/ledgerbridge_quickbooks/src/models.rs ---
//! Wire shapes for the QuickBooks proxy.
//!
//! Projection structs keep every leaf as `Option<Value>`: a field the provider
//! omits serializes as `null`, a field it sends keeps its original shape, and
//! anything not listed here is dropped on deserialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub type JsonObject = Map<String, Value>;

// --- Token Record ---

/// OAuth2 token payload plus the realm it belongs to.
///
/// Kept as the provider's JSON object so every key, explicit `null`s
/// included, is written back exactly as received. The accessors only read
/// the two keys this service interprets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenRecord(JsonObject);

pub const REALM_ID_KEY: &str = "realmId";

impl TokenRecord {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_object(&self) -> &JsonObject {
        &self.0
    }

    /// `access_token` when it is a non-blank string.
    pub fn access_token(&self) -> Option<&str> {
        self.0
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
    }

    /// The stored `realmId` value, whatever its JSON type.
    pub fn realm_id(&self) -> Option<&Value> {
        self.0.get(REALM_ID_KEY)
    }

    /// Realm id usable in a URL: a non-blank string or a number.
    pub fn usable_realm_id(&self) -> Option<String> {
        match self.realm_id()? {
            Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn set_realm_id(&mut self, realm_id: Value) {
        self.0.insert(REALM_ID_KEY.to_string(), realm_id);
    }
}

impl From<JsonObject> for TokenRecord {
    fn from(object: JsonObject) -> Self {
        Self(object)
    }
}

// --- Projections returned by the list endpoints ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct CustomerSummary {
    pub id: Option<Value>,
    pub display_name: Option<Value>,
    pub primary_email_addr: Option<Value>,
    pub primary_phone: Option<Value>,
    pub company_name: Option<Value>,
    pub balance: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceSummary {
    pub id: Option<Value>,
    pub doc_number: Option<Value>,
    pub customer_ref: Option<Value>,
    pub bill_email: Option<Value>,
    pub txn_date: Option<Value>,
    pub due_date: Option<Value>,
    pub line: Option<Value>,
    pub txn_tax_detail: Option<Value>,
    pub total_amt: Option<Value>,
    pub balance: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct InventoryItem {
    pub id: Option<Value>,
    pub name: Option<Value>,
    pub sku: Option<Value>,
    pub qty_on_hand: Option<Value>,
    pub unit_price: Option<Value>,
    #[serde(rename = "Type")]
    pub item_type: Option<Value>,
    pub active: Option<Value>,
}

// --- Source records for the joined customer/invoice view ---

/// Customer fields the joined view reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerContact {
    pub id: Option<Value>,
    pub display_name: Option<Value>,
    pub primary_email_addr: Option<JsonObject>,
}

impl CustomerContact {
    pub fn email_address(&self) -> Option<Value> {
        self.primary_email_addr
            .as_ref()
            .and_then(|addr| addr.get("Address"))
            .cloned()
    }
}

/// Invoice fields the joined view reads.
///
/// The three location sources stay untyped objects: an empty object counts as
/// absent while a populated one wins even without the wanted key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceDetail {
    pub doc_number: Option<Value>,
    pub customer_ref: Option<JsonObject>,
    pub txn_date: Option<Value>,
    pub due_date: Option<Value>,
    pub ship_addr: Option<JsonObject>,
    pub location_ref: Option<JsonObject>,
    pub sales_term_ref: Option<JsonObject>,
    #[serde(default)]
    pub line: Option<Vec<InvoiceLine>>,
}

impl InvoiceDetail {
    pub fn customer_id(&self) -> Option<&Value> {
        self.customer_ref.as_ref().and_then(|r| r.get("value"))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceLine {
    pub detail_type: Option<Value>,
    pub amount: Option<Value>,
    pub sales_item_line_detail: Option<SalesItemLineDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SalesItemLineDetail {
    pub item_ref: Option<JsonObject>,
    pub qty: Option<Value>,
    pub unit_price: Option<Value>,
}

// --- Joined view ---

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CustomerInvoiceLine {
    #[serde(rename = "type")]
    pub line_type: Option<Value>,
    pub name: Option<Value>,
    pub qty: Option<Value>,
    pub rate: Option<Value>,
    pub amount: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CustomerInvoice {
    pub customer: Option<Value>,
    pub customer_email: Option<Value>,
    pub invoice_date: Option<Value>,
    pub invoice_due_date: Option<Value>,
    pub location_of_sale: Option<Value>,
    pub invoice_no: Option<Value>,
    pub lines: Vec<CustomerInvoiceLine>,
}

// --- Invoice creation ---

/// Body accepted by `POST /create-invoice`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceCreateRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = Object, example = json!({"value": "1"})))]
    pub customer_ref: JsonObject,
    #[validate(length(min = 1, message = "at least one line item is required"))]
    pub line: Vec<InvoiceLineRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub bill_email: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub txn_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "PascalCase")]
pub struct InvoiceLineRequest {
    #[cfg_attr(feature = "openapi", schema(example = 100.0))]
    pub amount: f64,
    #[cfg_attr(feature = "openapi", schema(example = "SalesItemLineDetail"))]
    pub detail_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub sales_item_line_detail: Option<JsonObject>,
}

// --- Response envelopes ---

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CustomersResponse {
    pub customers: Vec<CustomerSummary>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct InvoicesResponse {
    pub invoices: Vec<InvoiceSummary>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CustomerInvoicesResponse {
    pub customer_invoices: Vec<CustomerInvoice>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct InventoryResponse {
    pub inventory: Vec<InventoryItem>,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CompanyInfoResponse {
    pub status_code: u16,
    /// Parsed JSON on 200, raw text otherwise.
    pub data: Value,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct RefreshResponse {
    pub success: bool,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub tokens: TokenRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_record_keeps_unknown_fields() {
        let raw = json!({
            "access_token": "a",
            "refresh_token": "r",
            "realmId": "123",
            "expires_in": 3600,
            "token_type": "bearer"
        });
        let record: TokenRecord = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(record.usable_realm_id().as_deref(), Some("123"));
        assert_eq!(record.get("expires_in"), Some(&json!(3600)));
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_token_record_keeps_explicit_nulls() {
        let raw = json!({"access_token": "a", "refresh_token": null, "x_refresh_token_expires_in": null});
        let record: TokenRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_token_record_numeric_realm_id() {
        let record: TokenRecord =
            serde_json::from_value(json!({"access_token": "t", "realmId": 4620816365u64})).unwrap();
        assert_eq!(record.usable_realm_id().as_deref(), Some("4620816365"));
        assert_eq!(record.realm_id(), Some(&json!(4620816365u64)));
    }

    #[test]
    fn test_token_record_blank_values_are_unusable() {
        let record: TokenRecord =
            serde_json::from_value(json!({"access_token": "  ", "realmId": ""})).unwrap();
        assert_eq!(record.access_token(), None);
        assert_eq!(record.usable_realm_id(), None);
        assert!(!record.is_empty());
        assert!(TokenRecord::default().is_empty());

        let record: TokenRecord =
            serde_json::from_value(json!({"access_token": 5, "realmId": null})).unwrap();
        assert_eq!(record.access_token(), None);
        assert_eq!(record.usable_realm_id(), None);
    }

    #[test]
    fn test_customer_projection_drops_unknown_and_nulls_missing() {
        let customer: CustomerSummary = serde_json::from_value(json!({
            "Id": "1",
            "DisplayName": "Amy's Bird Sanctuary",
            "PrimaryEmailAddr": {"Address": "birds@example.com"},
            "Foo": "bar"
        }))
        .unwrap();

        let out = serde_json::to_value(&customer).unwrap();
        assert!(out.get("Foo").is_none());
        assert_eq!(out["PrimaryEmailAddr"]["Address"], "birds@example.com");
        assert!(out["PrimaryPhone"].is_null());
        assert!(out["Balance"].is_null());
        assert_eq!(out.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_inventory_type_field_name() {
        let item: InventoryItem =
            serde_json::from_value(json!({"Id": "5", "Type": "Inventory", "QtyOnHand": 10}))
                .unwrap();
        let out = serde_json::to_value(&item).unwrap();
        assert_eq!(out["Type"], "Inventory");
        assert_eq!(out["QtyOnHand"], 10);
        assert!(out["Sku"].is_null());
    }

    #[test]
    fn test_invoice_create_request_omits_none_fields() {
        let request: InvoiceCreateRequest = serde_json::from_value(json!({
            "CustomerRef": {"value": "1"},
            "Line": [{"Amount": 100.0, "DetailType": "SalesItemLineDetail"}]
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "CustomerRef": {"value": "1"},
                "Line": [{"Amount": 100.0, "DetailType": "SalesItemLineDetail"}]
            })
        );
    }

    #[test]
    fn test_invoice_create_request_requires_a_line() {
        let request: InvoiceCreateRequest = serde_json::from_value(json!({
            "CustomerRef": {"value": "1"},
            "Line": []
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }
}
