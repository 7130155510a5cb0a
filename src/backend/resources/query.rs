/**
 * List Query Parsing
 *
 * `skip`, `limit` and per-resource equality filters from the query string.
 * Parameters that are not in the allow-list are ignored; empty values are
 * treated as absent.
 */

use std::collections::HashMap;

use serde_json::Value;

use crate::backend::database::{Filter, Page};
use crate::backend::error::BackendError;

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: Page,
    pub filter: Filter,
}

impl ListQuery {
    /// # Errors
    /// `Validation` if `skip` or `limit` is not a non-negative integer
    pub fn parse(params: &HashMap<String, String>, allowed: &[&str]) -> Result<Self, BackendError> {
        let skip = parse_count(params, "skip")?;
        let limit = parse_count(params, "limit")?;

        let filter = allowed
            .iter()
            .filter_map(|field| {
                params
                    .get(*field)
                    .map(|value| value.trim())
                    .filter(|value| !value.is_empty())
                    .map(|value| (field.to_string(), Value::String(value.to_string())))
            })
            .collect();

        Ok(Self {
            page: Page::new(skip, limit),
            filter,
        })
    }
}

fn parse_count(params: &HashMap<String, String>, key: &'static str) -> Result<Option<u64>, BackendError> {
    match params.get(key).map(|value| value.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<u64>().map(Some).map_err(|_| {
            BackendError::validation(key, format!("{} must be a non-negative integer", key))
        }),
    }
}
