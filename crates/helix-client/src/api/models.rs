use serde::Deserialize;

/// Cursor block attached to paginated Helix responses.
#[derive(Debug, Default, Deserialize)]
pub struct HelixPagination {
    #[serde(default)]
    pub cursor: Option<String>,
}

impl HelixPagination {
    /// The cursor for the next page, if there is one. Empty cursors count as none.
    pub fn next_cursor(self) -> Option<String> {
        self.cursor.filter(|cursor| !cursor.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pagination_object_has_no_cursor() {
        let parsed: HelixPagination = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.next_cursor(), None);
    }

    #[test]
    fn empty_cursor_string_is_treated_as_end() {
        let pagination = HelixPagination {
            cursor: Some(String::new()),
        };
        assert_eq!(pagination.next_cursor(), None);
    }

    #[test]
    fn cursor_is_passed_through() {
        let parsed: HelixPagination = serde_json::from_str(r#"{ "cursor": "abc" }"#).unwrap();
        assert_eq!(parsed.next_cursor().as_deref(), Some("abc"));
    }
}
