use serde::{Deserialize, Serialize};

use crate::shared::types::{deserialize_id, deserialize_optional_id, Filterable, STATUS_ACTIVE};

/// Category as served by `GET /categories/hierarchy`, children materialized
/// by the catalog service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default = "default_status")]
    pub status: i32,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub children: Vec<Category>,
}

fn default_status() -> i32 {
    STATUS_ACTIVE
}

impl Filterable for Category {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.slug]
    }

    fn status_flag(&self) -> Option<i32> {
        Some(self.status)
    }
}

impl Category {
    /// Number of nodes below this one, at any depth
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// True if `id` names this node or any node below it
    pub fn contains(&self, id: &str) -> bool {
        self.id == id || self.children.iter().any(|child| child.contains(id))
    }
}

/// Depth-first lookup by id across a forest
pub fn find<'a>(forest: &'a [Category], id: &str) -> Option<&'a Category> {
    forest.iter().find_map(|node| {
        if node.id == id {
            Some(node)
        } else {
            find(&node.children, id)
        }
    })
}

/// Whether attaching `node_id` under `parent_id` would create a cycle.
///
/// The parent may be neither the node itself nor one of its descendants.
pub fn would_create_cycle(forest: &[Category], node_id: &str, parent_id: &str) -> bool {
    if node_id == parent_id {
        return true;
    }
    find(forest, node_id).is_some_and(|node| node.contains(parent_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn forest() -> Vec<Category> {
        serde_json::from_value(json!([
            {
                "id": 1, "name": "Electronics", "slug": "electronics", "status": 1,
                "children": [
                    {"id": 2, "name": "Phones", "slug": "phones", "parentId": 1, "status": 0,
                     "children": [{"id": 4, "name": "Cases", "slug": "cases", "parentId": 2}]},
                    {"id": 3, "name": "Laptops", "slug": "laptops", "parentId": 1}
                ]
            },
            {"id": "x9", "name": "Books", "slug": "books", "parentId": ""}
        ]))
        .unwrap()
    }

    #[test]
    fn test_deserializes_upstream_shape() {
        let forest = forest();
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].id, "1");
        assert_eq!(forest[0].children[0].parent_id.as_deref(), Some("1"));
        assert_eq!(forest[0].children[0].status, 0);
        assert_eq!(forest[0].children[1].status, STATUS_ACTIVE);
        assert_eq!(forest[1].parent_id, None);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn test_survives_cache_round_trip() {
        let forest = forest();
        let value = serde_json::to_value(&forest).unwrap();
        let back: Vec<Category> = serde_json::from_value(value).unwrap();
        assert_eq!(back, forest);
    }

    #[test]
    fn test_find_and_descendants() {
        let forest = forest();
        assert_eq!(find(&forest, "4").map(|c| c.name.as_str()), Some("Cases"));
        assert!(find(&forest, "missing").is_none());
        assert_eq!(forest[0].descendant_count(), 3);
        assert_eq!(forest[1].descendant_count(), 0);
    }

    #[test]
    fn test_cycle_guard() {
        let forest = forest();
        assert!(would_create_cycle(&forest, "1", "1"));
        assert!(would_create_cycle(&forest, "1", "4"));
        assert!(would_create_cycle(&forest, "2", "4"));
        assert!(!would_create_cycle(&forest, "4", "3"));
        assert!(!would_create_cycle(&forest, "x9", "2"));
    }
}
