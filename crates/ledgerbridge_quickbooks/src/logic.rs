// --- File: crates/ledgerbridge_quickbooks/src/logic.rs ---
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::info;

use crate::client::QuickBooksClient;
use crate::error::QuickBooksError;
use crate::models::{
    CompanyInfoResponse, CustomerContact, CustomerInvoice, CustomerInvoiceLine, CustomerSummary,
    InventoryItem, InvoiceCreateRequest, InvoiceDetail, InvoiceLine, InvoiceSummary, JsonObject,
    TokenRecord,
};
use crate::store::TokenStore;

pub const CUSTOMERS_QUERY: &str = "SELECT * FROM Customer";
pub const CUSTOMER_CONTACTS_QUERY: &str = "SELECT Id, DisplayName, PrimaryEmailAddr FROM Customer";
pub const INVOICES_QUERY: &str = "SELECT * FROM Invoice";
pub const INVENTORY_QUERY: &str = "SELECT * FROM Item WHERE Type = 'Inventory'";

/// Build a client from the stored token record.
///
/// The realm id comes from the record, falling back to `company_id`.
pub fn client_for(
    record: &TokenRecord,
    company_id: Option<&str>,
    http: reqwest::Client,
    api_base: &str,
) -> Result<QuickBooksClient, QuickBooksError> {
    let access_token = record
        .access_token()
        .ok_or(QuickBooksError::NotAuthenticated)?;
    let realm_id = record
        .usable_realm_id()
        .or_else(|| {
            company_id
                .filter(|id| !id.trim().is_empty())
                .map(str::to_string)
        })
        .ok_or(QuickBooksError::NotAuthenticated)?;

    Ok(QuickBooksClient::new(http, api_base, access_token, realm_id))
}

/// Load the token record and build a client from it.
pub async fn client_from_store(
    store: &dyn TokenStore,
    company_id: Option<&str>,
    http: reqwest::Client,
    api_base: &str,
) -> Result<QuickBooksClient, QuickBooksError> {
    let record = store.load().await?;
    client_for(&record, company_id, http, api_base)
}

/// Pull `QueryResponse.<entity>` out of a query result body.
///
/// A missing response object, entity key or `null` list all yield an empty
/// list; QuickBooks omits the key when nothing matches.
pub fn extract_entities<T: DeserializeOwned>(
    body: &str,
    entity: &str,
) -> Result<Vec<T>, QuickBooksError> {
    let mut document: Value = serde_json::from_str(body)?;
    let list = document
        .get_mut("QueryResponse")
        .and_then(|response| response.get_mut(entity))
        .map(Value::take)
        .unwrap_or(Value::Null);

    if list.is_null() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(list)?)
}

async fn run_query<T: DeserializeOwned>(
    client: &QuickBooksClient,
    statement: &str,
    entity: &str,
) -> Result<Vec<T>, QuickBooksError> {
    let body = client.query(statement).await?.accept(&[StatusCode::OK])?;
    let records = extract_entities(&body, entity)?;
    info!("{} query returned {} record(s)", entity, records.len());
    Ok(records)
}

pub async fn fetch_customers(
    client: &QuickBooksClient,
) -> Result<Vec<CustomerSummary>, QuickBooksError> {
    run_query(client, CUSTOMERS_QUERY, "Customer").await
}

pub async fn fetch_invoices(
    client: &QuickBooksClient,
) -> Result<Vec<InvoiceSummary>, QuickBooksError> {
    run_query(client, INVOICES_QUERY, "Invoice").await
}

pub async fn fetch_inventory(
    client: &QuickBooksClient,
) -> Result<Vec<InventoryItem>, QuickBooksError> {
    run_query(client, INVENTORY_QUERY, "Item").await
}

/// Customers first, then invoices; either failure aborts the whole view.
pub async fn fetch_customer_invoices(
    client: &QuickBooksClient,
) -> Result<Vec<CustomerInvoice>, QuickBooksError> {
    let customers: Vec<CustomerContact> =
        run_query(client, CUSTOMER_CONTACTS_QUERY, "Customer").await?;
    let invoices: Vec<InvoiceDetail> = run_query(client, INVOICES_QUERY, "Invoice").await?;
    Ok(join_customer_invoices(customers, &invoices))
}

pub async fn fetch_company_info(
    client: &QuickBooksClient,
) -> Result<CompanyInfoResponse, QuickBooksError> {
    let response = client.get_company_info().await?;
    let data = if response.status == StatusCode::OK {
        serde_json::from_str(&response.body)?
    } else {
        Value::String(response.body)
    };
    Ok(CompanyInfoResponse {
        status_code: response.status.as_u16(),
        data,
    })
}

/// Forward a validated invoice and hand back the provider's JSON untouched.
pub async fn create_invoice(
    client: &QuickBooksClient,
    payload: &InvoiceCreateRequest,
) -> Result<Value, QuickBooksError> {
    let body = client
        .create_invoice(payload)
        .await?
        .accept(&[StatusCode::OK, StatusCode::CREATED])?;
    Ok(serde_json::from_str(&body)?)
}

// Ids are matched on their JSON form, so "1" and 1 stay distinct.
fn lookup_key(id: &Value) -> String {
    id.to_string()
}

/// Populated objects count, empty ones are skipped.
fn present(object: &Option<JsonObject>) -> Option<&JsonObject> {
    object.as_ref().filter(|o| !o.is_empty())
}

/// Where the sale happened: ship-to city, else location name, else sales
/// term name. The first populated source object decides, even when the
/// wanted key inside it is missing.
pub fn location_of_sale(invoice: &InvoiceDetail) -> Option<Value> {
    if let Some(ship_addr) = present(&invoice.ship_addr) {
        ship_addr.get("City").cloned()
    } else if let Some(location) = present(&invoice.location_ref) {
        location.get("name").cloned()
    } else if let Some(term) = present(&invoice.sales_term_ref) {
        term.get("name").cloned()
    } else {
        None
    }
}

pub fn project_line(line: &InvoiceLine) -> CustomerInvoiceLine {
    let detail = line.sales_item_line_detail.as_ref();
    CustomerInvoiceLine {
        line_type: line.detail_type.clone(),
        name: detail
            .and_then(|d| d.item_ref.as_ref())
            .and_then(|item| item.get("name"))
            .cloned(),
        qty: detail.and_then(|d| d.qty.clone()),
        rate: detail.and_then(|d| d.unit_price.clone()),
        amount: line.amount.clone(),
    }
}

pub fn join_customer_invoices(
    customers: Vec<CustomerContact>,
    invoices: &[InvoiceDetail],
) -> Vec<CustomerInvoice> {
    let by_id: HashMap<String, CustomerContact> = customers
        .into_iter()
        .filter_map(|c| {
            let key = lookup_key(c.id.as_ref()?);
            Some((key, c))
        })
        .collect();
    let unknown = CustomerContact::default();

    invoices
        .iter()
        .map(|invoice| {
            let customer = invoice
                .customer_id()
                .and_then(|id| by_id.get(&lookup_key(id)))
                .unwrap_or(&unknown);

            CustomerInvoice {
                customer: customer.display_name.clone(),
                customer_email: customer.email_address(),
                invoice_date: invoice.txn_date.clone(),
                invoice_due_date: invoice.due_date.clone(),
                location_of_sale: location_of_sale(invoice),
                invoice_no: invoice.doc_number.clone(),
                lines: invoice
                    .line
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(project_line)
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryTokenStore;
    use serde_json::json;

    fn invoice(value: Value) -> InvoiceDetail {
        serde_json::from_value(value).unwrap()
    }

    fn customer(value: Value) -> CustomerContact {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_location_prefers_ship_addr_city() {
        let inv = invoice(json!({
            "ShipAddr": {"City": "X"},
            "LocationRef": {"name": "Y"},
            "SalesTermRef": {"name": "Z"}
        }));
        assert_eq!(location_of_sale(&inv), Some(json!("X")));
    }

    #[test]
    fn test_location_falls_back_to_sales_term() {
        let inv = invoice(json!({"SalesTermRef": {"name": "Z"}}));
        assert_eq!(location_of_sale(&inv), Some(json!("Z")));

        let inv = invoice(json!({"DocNumber": "1001"}));
        assert_eq!(location_of_sale(&inv), None);
    }

    #[test]
    fn test_location_skips_empty_and_null_sources() {
        let inv = invoice(json!({
            "ShipAddr": {},
            "LocationRef": null,
            "SalesTermRef": {"name": "Net 30"}
        }));
        assert_eq!(location_of_sale(&inv), Some(json!("Net 30")));
    }

    #[test]
    fn test_location_populated_source_without_key_is_null() {
        let inv = invoice(json!({
            "ShipAddr": {"Line1": "123 Main St"},
            "LocationRef": {"name": "Y"}
        }));
        assert_eq!(location_of_sale(&inv), None);
    }

    #[test]
    fn test_project_line_with_missing_detail() {
        let line: InvoiceLine = serde_json::from_value(json!({
            "DetailType": "SubTotalLineDetail",
            "Amount": 150.0
        }))
        .unwrap();

        let out = serde_json::to_value(project_line(&line)).unwrap();
        assert_eq!(
            out,
            json!({"type": "SubTotalLineDetail", "name": null, "qty": null, "rate": null, "amount": 150.0})
        );
    }

    #[test]
    fn test_project_line_reads_nested_detail() {
        let line: InvoiceLine = serde_json::from_value(json!({
            "DetailType": "SalesItemLineDetail",
            "Amount": 50,
            "SalesItemLineDetail": {
                "ItemRef": {"value": "3", "name": "Concrete"},
                "Qty": 2,
                "UnitPrice": 25
            }
        }))
        .unwrap();

        let projected = project_line(&line);
        assert_eq!(projected.name, Some(json!("Concrete")));
        assert_eq!(projected.qty, Some(json!(2)));
        assert_eq!(projected.rate, Some(json!(25)));
    }

    #[test]
    fn test_join_resolves_customer_and_tolerates_unknown_ref() {
        let customers = vec![customer(json!({
            "Id": "1",
            "DisplayName": "Amy's Bird Sanctuary",
            "PrimaryEmailAddr": {"Address": "birds@example.com"}
        }))];
        let invoices = vec![
            invoice(json!({"DocNumber": "1001", "CustomerRef": {"value": "1"}, "TxnDate": "2025-01-02"})),
            invoice(json!({"DocNumber": "1002", "CustomerRef": {"value": "99"}})),
            invoice(json!({"DocNumber": "1003"})),
        ];

        let joined = join_customer_invoices(customers, &invoices);
        assert_eq!(joined.len(), 3);
        assert_eq!(joined[0].customer, Some(json!("Amy's Bird Sanctuary")));
        assert_eq!(joined[0].customer_email, Some(json!("birds@example.com")));
        assert_eq!(joined[0].invoice_date, Some(json!("2025-01-02")));
        assert!(joined[0].lines.is_empty());

        let unmatched = serde_json::to_value(&joined[1]).unwrap();
        assert!(unmatched["customer"].is_null());
        assert!(unmatched["customer_email"].is_null());
        assert_eq!(unmatched["invoice_no"], "1002");

        assert!(joined[2].customer.is_none());
    }

    #[test]
    fn test_extract_entities_handles_missing_list() {
        let empty: Vec<CustomerSummary> =
            extract_entities(r#"{"QueryResponse":{}}"#, "Customer").unwrap();
        assert!(empty.is_empty());

        let none: Vec<CustomerSummary> = extract_entities(r#"{"time":"now"}"#, "Customer").unwrap();
        assert!(none.is_empty());

        let items: Vec<InventoryItem> = extract_entities(
            r#"{"QueryResponse":{"Item":[{"Id":"11","Name":"Pump","Foo":1}]}}"#,
            "Item",
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, Some(json!("Pump")));
    }

    #[test]
    fn test_extract_entities_rejects_non_json() {
        let result: Result<Vec<CustomerSummary>, _> = extract_entities("<html>", "Customer");
        assert!(matches!(result, Err(QuickBooksError::Parse(_))));
    }

    #[test]
    fn test_client_for_uses_company_id_fallback() {
        let record: TokenRecord = serde_json::from_value(json!({"access_token": "a"})).unwrap();
        let client = client_for(&record, Some("777"), reqwest::Client::new(), "http://qbo").unwrap();
        assert_eq!(client.realm_id(), "777");

        let record: TokenRecord =
            serde_json::from_value(json!({"access_token": "a", "realmId": "123"})).unwrap();
        let client = client_for(&record, Some("777"), reqwest::Client::new(), "http://qbo").unwrap();
        assert_eq!(client.realm_id(), "123");
    }

    #[tokio::test]
    async fn test_client_from_empty_store_is_not_authenticated() {
        let store = InMemoryTokenStore::new();
        let result =
            client_from_store(&store, Some("777"), reqwest::Client::new(), "http://qbo").await;
        assert!(matches!(result, Err(QuickBooksError::NotAuthenticated)));
    }
}
