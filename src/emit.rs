//! SQL record emission for resolved literals.
//!
//! Each literal becomes a key insert immediately followed by its default value
//! insert; the second statement references the first through
//! `LAST_INSERT_ID()`, so the pair must never be split or reordered.
//!
//! Quote doubling is the only escaping applied. Other SQL-significant input is
//! passed through unchanged.
use crate::config::SqlSchema;

/// Where the default value of a literal came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Reference(String),
    Operator(String),
    Unresolved,
}

impl Resolution {
    /// Value to store; unresolved literals get an empty default.
    pub fn value(&self) -> &str {
        match self {
            Resolution::Reference(value) | Resolution::Operator(value) => value,
            Resolution::Unresolved => "",
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }
}

/// Why the reference lookup did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    NotFound,
    Pattern(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLiteral {
    pub key: String,
    pub resolution: Resolution,
    /// Set only when a reference document was in use and the lookup failed.
    pub lookup_failure: Option<LookupFailure>,
}

pub fn escape_sql_value(value: &str) -> String {
    value.replace('\'', "''")
}

/// Statement lines for one literal, with a leading comment on lookup failure.
pub fn emit(schema: &SqlSchema, page_id: i64, literal: &ResolvedLiteral) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);
    match &literal.lookup_failure {
        Some(LookupFailure::NotFound) => {
            lines.push(format!("-- No default value found for: '{}'", literal.key));
        }
        Some(LookupFailure::Pattern(reason)) => {
            lines.push(format!(
                "-- No default value found for: '{}' ({})",
                literal.key, reason
            ));
        }
        None => {}
    }
    lines.push(format!(
        "INSERT INTO `{db}`.`LiteralKey` (`IdPage`, `IdApp`, `IdStatus`, `Key`, `IdBusiness`) VALUES ({page_id},{app},{status},'{key}',{business});",
        db = schema.database,
        app = schema.app_id,
        status = schema.status_id,
        key = escape_sql_value(&literal.key),
        business = schema.business_id,
    ));
    lines.push(format!(
        "INSERT INTO `{db}`.`LiteralDefaultValue` (`IdLanguage`, `Value`, IdLiteralKey) VALUES ({lang},'{value}',LAST_INSERT_ID());",
        db = schema.database,
        lang = schema.language_id,
        value = escape_sql_value(literal.resolution.value()),
    ));
    lines
}
