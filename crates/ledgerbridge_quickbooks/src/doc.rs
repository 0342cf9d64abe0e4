// File: crates/ledgerbridge_quickbooks/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{
    CompanyInfoResponse, CustomerInvoice, CustomerInvoiceLine, CustomerInvoicesResponse,
    CustomerSummary, CustomersResponse, InventoryItem, InventoryResponse, InvoiceCreateRequest,
    InvoiceLineRequest, InvoiceSummary, InvoicesResponse, RefreshResponse,
};

#[utoipa::path(
    get,
    path = "/customer-info",
    responses(
        (status = 200, description = "Company info with the upstream status code, or {\"error\": ...} when not authenticated", body = CompanyInfoResponse,
         example = json!({"status_code": 200, "data": {"CompanyInfo": {"CompanyName": "Sandbox Company_US_1"}}})
        )
    )
)]
fn doc_company_info_handler() {}

#[utoipa::path(
    get,
    path = "/refresh",
    responses(
        (status = 200, description = "Tokens refreshed and persisted, or {\"error\": ...} when no refresh token is configured or the provider rejects it", body = RefreshResponse,
         example = json!({
             "success": true,
             "tokens": {"access_token": "eyJ...", "refresh_token": "AB11...", "expires_in": 3600, "realmId": "4620816365"}
         })
        )
    )
)]
fn doc_refresh_handler() {}

#[utoipa::path(
    get,
    path = "/customers",
    responses(
        (status = 200, description = "All customers, projected", body = CustomersResponse),
        (status = 502, description = "Provider unreachable or returned non-JSON")
    )
)]
fn doc_customers_handler() {}

#[utoipa::path(
    get,
    path = "/invoices",
    responses(
        (status = 200, description = "All invoices, projected", body = InvoicesResponse),
        (status = 502, description = "Provider unreachable or returned non-JSON")
    )
)]
fn doc_invoices_handler() {}

#[utoipa::path(
    get,
    path = "/customer-invoices",
    responses(
        (status = 200, description = "Invoices joined with their customer", body = CustomerInvoicesResponse,
         example = json!({
             "customer_invoices": [{
                 "customer": "Amy's Bird Sanctuary",
                 "customer_email": "birds@example.com",
                 "invoice_date": "2025-01-02",
                 "invoice_due_date": "2025-02-01",
                 "location_of_sale": "Bayshore",
                 "invoice_no": "1001",
                 "lines": [{"type": "SalesItemLineDetail", "name": "Gardening", "qty": 2, "rate": 25, "amount": 50}]
             }]
         })
        )
    )
)]
fn doc_customer_invoices_handler() {}

#[utoipa::path(
    post,
    path = "/create-invoice",
    request_body(content = InvoiceCreateRequest, example = json!({
        "CustomerRef": {"value": "1"},
        "Line": [{
            "Amount": 100.0,
            "DetailType": "SalesItemLineDetail",
            "SalesItemLineDetail": {"ItemRef": {"value": "1", "name": "Services"}}
        }]
    })),
    responses(
        (status = 200, description = "Provider response for the created invoice"),
        (status = 422, description = "Invalid invoice payload",
         example = json!({"error": {"message": "Validation error: line: at least one line item is required", "code": 422}})
        )
    )
)]
fn doc_create_invoice_handler() {}

#[utoipa::path(
    get,
    path = "/inventory",
    responses(
        (status = 200, description = "Inventory items, projected", body = InventoryResponse)
    )
)]
fn doc_inventory_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_company_info_handler,
        doc_refresh_handler,
        doc_customers_handler,
        doc_invoices_handler,
        doc_customer_invoices_handler,
        doc_create_invoice_handler,
        doc_inventory_handler
    ),
    components(
        schemas(
            CompanyInfoResponse,
            RefreshResponse,
            CustomerSummary,
            CustomersResponse,
            InvoiceSummary,
            InvoicesResponse,
            CustomerInvoiceLine,
            CustomerInvoice,
            CustomerInvoicesResponse,
            InventoryItem,
            InventoryResponse,
            InvoiceCreateRequest,
            InvoiceLineRequest
        )
    ),
    tags(
        (name = "quickbooks", description = "QuickBooks Online proxy API")
    )
)]
pub struct QuickBooksApiDoc;
