use std::fmt;

///A single cell of a fetched row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Text(String),
    ///Numbers keep the textual form the source produced so no precision is lost on the way out.
    Number(String),
    Bool(bool),
    ///Anything else that is rendered through its plain string form (dates, times, hex blobs).
    Other(String),
    ///Nested objects and arrays returned by the REST API.
    Document(serde_json::Value),
}

impl Value {
    ///Renders the value as a literal for an INSERT statement.
    ///
    ///Only text is quoted. Embedded single quotes are doubled and nothing else is escaped.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Text(s) => quote_text(s),
            Value::Number(n) => n.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Other(s) => s.clone(),
            Value::Document(doc) => doc.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Text(s) | Value::Other(s) => serde_json::Value::String(s.clone()),
            Value::Number(n) => match n.parse::<serde_json::Number>() {
                Ok(number) => serde_json::Value::Number(number),
                Err(_) => serde_json::Value::String(n.clone()),
            },
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Document(doc) => doc.clone(),
        }
    }
}

fn quote_text(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.to_string()),
            serde_json::Value::String(s) => Value::Text(s),
            doc @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => Value::Document(doc),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql_literal())
    }
}
