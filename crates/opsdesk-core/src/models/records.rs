//! Data-transfer types for the domain screens.
//!
//! The backend owns these shapes; the client only lists them. Every field
//! is optional so a schema change on the server degrades to blank cells
//! instead of a failed page.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier as the backend sends it: numeric or an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    pub fn is_blank(&self) -> bool {
        matches!(self, RecordId::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// One-line rendering of a record for list views.
pub trait Summary {
    fn title(&self) -> String;
    fn detail(&self) -> String;
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().filter(|s| !s.is_empty()).unwrap_or("-")
}

fn money(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl Summary for Customer {
    fn title(&self) -> String {
        or_dash(&self.name).to_string()
    }

    fn detail(&self) -> String {
        format!("{}  {}", or_dash(&self.company), or_dash(&self.email))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Summary for Lead {
    fn title(&self) -> String {
        or_dash(&self.name).to_string()
    }

    fn detail(&self) -> String {
        format!("{}  via {}", or_dash(&self.status), or_dash(&self.source))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl Summary for Product {
    fn title(&self) -> String {
        or_dash(&self.name).to_string()
    }

    fn detail(&self) -> String {
        format!("{}  {}", or_dash(&self.sku), money(self.price))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl Summary for Employee {
    fn title(&self) -> String {
        or_dash(&self.name).to_string()
    }

    fn detail(&self) -> String {
        format!("{}  {}", or_dash(&self.position), or_dash(&self.department))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub headcount: Option<u32>,
}

impl Summary for Department {
    fn title(&self) -> String {
        or_dash(&self.name).to_string()
    }

    fn detail(&self) -> String {
        let headcount = self.headcount.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
        format!("manager {}  staff {}", or_dash(&self.manager), headcount)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Summary for FinanceRecord {
    fn title(&self) -> String {
        or_dash(&self.description).to_string()
    }

    fn detail(&self) -> String {
        format!("{}  {}  {}", or_dash(&self.kind), money(self.amount), or_dash(&self.date))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub valid_until: Option<String>,
}

impl Summary for Quotation {
    fn title(&self) -> String {
        or_dash(&self.customer).to_string()
    }

    fn detail(&self) -> String {
        format!("{}  {}  until {}", or_dash(&self.status), money(self.total), or_dash(&self.valid_until))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl Summary for Invoice {
    fn title(&self) -> String {
        format!("{} {}", or_dash(&self.number), or_dash(&self.customer))
    }

    fn detail(&self) -> String {
        format!("{}  {}  due {}", or_dash(&self.status), money(self.amount), or_dash(&self.due_date))
    }
}
