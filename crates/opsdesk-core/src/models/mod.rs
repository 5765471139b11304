//! Data models for opsdesk.
//!
//! - `auth`: request/response bodies of the authentication exchanges
//! - `records`: data-transfer types for the domain screens (customers,
//!   leads, products, employees, departments, finance, quotations, invoices)

pub mod auth;
pub mod records;

pub use auth::{AuthResponse, SignInRequest, SignUpRequest, UserRecord};
pub use records::{
    Customer, Department, Employee, FinanceRecord, Invoice, Lead, Product, Quotation, RecordId,
    Summary,
};
