//! One page of search results.

use super::item::{Item, Repository, User};
use super::query::SearchType;
use serde::{Deserialize, Serialize};

/// A fetched page: `{total_count, incomplete_results, items}`.
///
/// Pages are only ever appended by the pagination engine; their item order
/// is the order returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Page {
    /// Total matches reported by GitHub, not the items on this page.
    pub total_count: u64,
    /// Set when GitHub timed out before finding every match.
    pub incomplete_results: bool,
    /// Items in API order.
    pub items: Vec<Item>,
}

/// Wire shape shared by both search endpoints.
#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    total_count: u64,
    #[serde(default)]
    incomplete_results: bool,
    items: Vec<T>,
}

impl Page {
    /// A complete page with the given items.
    pub fn new(total_count: u64, items: Vec<Item>) -> Self {
        Self {
            total_count,
            incomplete_results: false,
            items,
        }
    }

    /// Decode a search response body for the given endpoint.
    ///
    /// Only the shape is checked; item contents are taken as-is.
    pub fn from_json(search_type: SearchType, body: serde_json::Value) -> Result<Self, serde_json::Error> {
        match search_type {
            SearchType::Users => {
                let response: SearchResponse<User> = serde_json::from_value(body)?;
                Ok(Self {
                    total_count: response.total_count,
                    incomplete_results: response.incomplete_results,
                    items: response.items.into_iter().map(Item::User).collect(),
                })
            }
            SearchType::Repositories => {
                let response: SearchResponse<Repository> = serde_json::from_value(body)?;
                Ok(Self {
                    total_count: response.total_count,
                    incomplete_results: response.incomplete_results,
                    items: response.items.into_iter().map(Item::Repository).collect(),
                })
            }
        }
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_user_page() {
        let body = json!({
            "total_count": 100,
            "incomplete_results": false,
            "items": [{
                "login": "testuser",
                "id": 1,
                "avatar_url": "https://avatars.githubusercontent.com/u/1?v=4",
                "html_url": "https://github.com/testuser"
            }]
        });

        let page = Page::from_json(SearchType::Users, body).unwrap();
        assert_eq!(page.total_count, 100);
        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].title(), "testuser");
    }

    #[test]
    fn missing_incomplete_flag_defaults_to_false() {
        let body = json!({"total_count": 0, "items": []});
        let page = Page::from_json(SearchType::Repositories, body).unwrap();
        assert!(!page.incomplete_results);
        assert!(page.is_empty());
    }

    #[test]
    fn rejects_wrong_shape() {
        let body = json!({"message": "Bad credentials"});
        assert!(Page::from_json(SearchType::Users, body).is_err());
    }

    #[test]
    fn user_items_do_not_decode_as_repositories() {
        let body = json!({
            "total_count": 1,
            "items": [{"login": "u", "id": 1, "avatar_url": "a", "html_url": "h"}]
        });
        assert!(Page::from_json(SearchType::Repositories, body).is_err());
    }
}
