//! Property-based tests for pagination and filters

use crm_hrms::backend::database::{Document, Filter, Page, DEFAULT_LIMIT, MAX_LIMIT};
use crm_hrms::backend::resources::query::ListQuery;
use proptest::prelude::*;
use serde_json::Value;
use std::collections::HashMap;

proptest! {
    #[test]
    fn test_page_limit_is_clamped(skip in any::<u64>(), limit in any::<u64>()) {
        let page = Page::new(Some(skip), Some(limit));
        prop_assert_eq!(page.skip, skip);
        prop_assert!(page.limit <= MAX_LIMIT);
        if limit <= MAX_LIMIT {
            prop_assert_eq!(page.limit, limit);
        }
    }

    #[test]
    fn test_page_defaults(skip in proptest::option::of(0u64..10_000)) {
        let page = Page::new(skip, None);
        prop_assert_eq!(page.limit, DEFAULT_LIMIT);
        prop_assert_eq!(page.skip, skip.unwrap_or(0));
    }

    #[test]
    fn test_filter_matches_its_own_fields(
        fields in proptest::collection::hash_map("[a-z_]{1,12}", "[a-zA-Z0-9 ]{0,16}", 1..6),
    ) {
        let doc: Document = fields
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        let filter: Filter = fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

        prop_assert!(filter.is_well_formed());
        prop_assert!(filter.matches(&doc));
        prop_assert!(Filter::new().matches(&doc));
    }

    #[test]
    fn test_filter_rejects_changed_value(
        field in "[a-z_]{1,12}",
        value in "[a-z]{1,16}",
        other in "[A-Z]{1,16}",
    ) {
        let mut doc = Document::new();
        doc.insert(field.clone(), Value::String(value));
        prop_assert!(!Filter::new().eq(field, other).matches(&doc));
    }

    #[test]
    fn test_list_query_keeps_only_allowed_filters(
        status in "[a-z]{1,10}",
        noise in "[a-z]{1,10}",
    ) {
        let params: HashMap<String, String> = [
            ("status".to_string(), status.clone()),
            ("owner_email".to_string(), noise),
        ]
        .into_iter()
        .collect();

        let query = ListQuery::parse(&params, &["status"]).unwrap();
        prop_assert_eq!(query.filter, Filter::new().eq("status", status));
    }

    #[test]
    fn test_list_query_rejects_non_numeric_limit(limit in "[a-z]{1,8}") {
        let params: HashMap<String, String> =
            [("limit".to_string(), limit)].into_iter().collect();
        prop_assert!(ListQuery::parse(&params, &[]).is_err());
    }
}
