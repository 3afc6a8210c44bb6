use serde::{Deserialize, Serialize};

/// Query-string predicates accepted by `GET /api/v1/children`.
///
/// The fields are parsed and passed down to the repository, but no query
/// applies them yet: listing always returns every child up to the row cap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChildFilter {
    pub name: Option<String>,
    pub group_id: Option<String>,
}

impl ChildFilter {
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().map_or(true, str::is_empty)
            && self.group_id.as_deref().map_or(true, str::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_count_as_absent() {
        let filter = ChildFilter {
            name: Some(String::new()),
            group_id: None,
        };
        assert!(filter.is_empty());

        let filter = ChildFilter {
            name: None,
            group_id: Some("g1".to_string()),
        };
        assert!(!filter.is_empty());
    }
}
