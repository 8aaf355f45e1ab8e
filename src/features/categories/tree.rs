//! Category hierarchy renderer.
//!
//! Turns the hierarchy served by the catalog service into a filtered view
//! model a UI can draw as-is. Matching is evaluated per node:
//!
//! - a node is *shown* when it matches both the search term (name or slug,
//!   case-insensitive) and the status filter;
//! - a node is *rendered* when it is shown, or when one of its **direct**
//!   children is shown;
//! - a node that is not rendered hides its whole subtree.
//!
//! The lookahead is one level deep on purpose: a match two levels down does
//! not pull its grandparent into view. See [`has_directly_visible_child`].

use std::collections::HashSet;

use serde::Serialize;
use utoipa::ToSchema;

use crate::features::categories::models::Category;
use crate::shared::constants::DESCRIPTION_PREVIEW_CHARS;
use crate::shared::types::{matches_search, preview, StatusFilter, STATUS_ACTIVE};

/// Search term and status filter applied to the tree
#[derive(Debug, Clone, Default)]
pub struct TreeFilter {
    search: String,
    status: StatusFilter,
}

impl TreeFilter {
    pub fn new(search: Option<&str>, status: StatusFilter) -> Self {
        Self {
            search: search.unwrap_or_default().to_string(),
            status,
        }
    }

    pub fn matches_search(&self, category: &Category) -> bool {
        matches_search(&self.search, &[&category.name, &category.slug])
    }

    pub fn matches_status(&self, category: &Category) -> bool {
        self.status.matches(category.status)
    }

    pub fn should_show(&self, category: &Category) -> bool {
        self.matches_search(category) && self.matches_status(category)
    }
}

/// One-level lookahead: true when at least one immediate child is shown.
/// Grandchildren are not consulted.
pub fn has_directly_visible_child(category: &Category, filter: &TreeFilter) -> bool {
    category
        .children
        .iter()
        .any(|child| filter.should_show(child))
}

pub fn is_rendered(category: &Category, filter: &TreeFilter) -> bool {
    filter.should_show(category) || has_directly_visible_child(category, filter)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NodeIcon {
    Leaf,
    Branch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The catalog has no categories at all
    NoCategories,
    /// Categories exist but none survive the filters
    NoMatches,
}

/// A rendered node of the category tree
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(no_recursion)]
pub struct CategoryNodeView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub status: i32,
    /// "Active" or "Inactive"
    pub status_label: String,
    pub sort_order: i32,
    /// Direct children before filtering
    pub child_count: usize,
    pub icon: NodeIcon,
    pub expandable: bool,
    pub expanded: bool,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The node matches the filters itself, rather than only through a child
    pub matched: bool,
    pub children: Vec<CategoryNodeView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryTreeView {
    pub nodes: Vec<CategoryNodeView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
    /// Nodes in the hierarchy
    pub total_nodes: usize,
    /// Nodes that passed the filters, collapsed subtrees included
    pub visible_nodes: usize,
}

/// Render the forest under `filter`. Nodes whose id is in `collapsed` keep
/// their place and counts but list no children.
pub fn render_tree(
    categories: &[Category],
    filter: &TreeFilter,
    collapsed: &HashSet<String>,
) -> CategoryTreeView {
    if categories.is_empty() {
        return CategoryTreeView {
            nodes: Vec::new(),
            empty_state: Some(EmptyState::NoCategories),
            total_nodes: 0,
            visible_nodes: 0,
        };
    }

    let mut renderer = Renderer {
        filter,
        collapsed,
        visible: 0,
    };
    let nodes = renderer.render_level(categories, 0);

    let empty_state = nodes.is_empty().then_some(EmptyState::NoMatches);

    CategoryTreeView {
        nodes,
        empty_state,
        total_nodes: categories.iter().map(|c| 1 + c.descendant_count()).sum(),
        visible_nodes: renderer.visible,
    }
}

struct Renderer<'a> {
    filter: &'a TreeFilter,
    collapsed: &'a HashSet<String>,
    visible: usize,
}

impl Renderer<'_> {
    fn render_level(&mut self, level: &[Category], depth: usize) -> Vec<CategoryNodeView> {
        let filter = self.filter;
        let mut nodes = Vec::new();
        for category in level.iter().filter(|c| is_rendered(c, filter)) {
            nodes.push(self.render_node(category, depth));
        }
        nodes
    }

    fn render_node(&mut self, category: &Category, depth: usize) -> CategoryNodeView {
        self.visible += 1;

        let expandable = !category.children.is_empty();
        let expanded = expandable && !self.collapsed.contains(&category.id);

        let children = if expanded {
            self.render_level(&category.children, depth + 1)
        } else {
            // collapsed subtrees still count towards the visible total
            self.visible += self.count_rendered(&category.children);
            Vec::new()
        };

        CategoryNodeView {
            id: category.id.clone(),
            name: category.name.clone(),
            slug: category.slug.clone(),
            status: category.status,
            status_label: status_label(category.status).to_string(),
            sort_order: category.sort_order,
            child_count: category.children.len(),
            icon: if expandable {
                NodeIcon::Branch
            } else {
                NodeIcon::Leaf
            },
            expandable,
            expanded,
            depth,
            thumbnail: category
                .image
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            description: category
                .description
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .map(|text| preview(text, DESCRIPTION_PREVIEW_CHARS)),
            matched: self.filter.should_show(category),
            children,
        }
    }

    fn count_rendered(&self, level: &[Category]) -> usize {
        level
            .iter()
            .filter(|category| is_rendered(category, self.filter))
            .map(|category| 1 + self.count_rendered(&category.children))
            .sum()
    }
}

fn status_label(status: i32) -> &'static str {
    if status == STATUS_ACTIVE {
        "Active"
    } else {
        "Inactive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn category(value: serde_json::Value) -> Category {
        serde_json::from_value(value).unwrap()
    }

    /// Electronics(active) > Phones(inactive, slug "phones")
    fn electronics() -> Vec<Category> {
        vec![category(json!({
            "id": "1", "name": "Electronics", "slug": "electronics", "status": 1,
            "children": [
                {"id": "2", "name": "Phones", "slug": "phones", "status": 0, "parentId": "1"}
            ]
        }))]
    }

    /// Three levels, every node active
    fn three_levels() -> Vec<Category> {
        vec![category(json!({
            "id": "top", "name": "Home", "slug": "home", "status": 1,
            "children": [{
                "id": "mid", "name": "Kitchen", "slug": "kitchen", "status": 1,
                "children": [
                    {"id": "leaf", "name": "Kettles", "slug": "kettles", "status": 1}
                ]
            }]
        }))]
    }

    fn ids(nodes: &[CategoryNodeView]) -> Vec<String> {
        let mut out = Vec::new();
        for node in nodes {
            out.push(node.id.clone());
            out.extend(ids(&node.children));
        }
        out
    }

    fn render(categories: &[Category], search: &str, status: StatusFilter) -> CategoryTreeView {
        render_tree(
            categories,
            &TreeFilter::new(Some(search), status),
            &HashSet::new(),
        )
    }

    #[test]
    fn test_no_filter_shows_everything() {
        let view = render(&three_levels(), "", StatusFilter::All);
        assert_eq!(ids(&view.nodes), vec!["top", "mid", "leaf"]);
        assert_eq!(view.total_nodes, 3);
        assert_eq!(view.visible_nodes, 3);
        assert!(view.empty_state.is_none());
        assert!(view.nodes[0].matched);
    }

    #[test]
    fn test_search_matches_name_or_slug_any_case() {
        let view = render(&electronics(), "PHON", StatusFilter::All);
        assert_eq!(ids(&view.nodes), vec!["1", "2"]);
        assert!(!view.nodes[0].matched);
        assert!(view.nodes[0].children[0].matched);

        let view = render(&electronics(), "electr", StatusFilter::All);
        assert_eq!(ids(&view.nodes), vec!["1"]);
    }

    #[test]
    fn test_search_term_is_matched_verbatim() {
        let view = render(&electronics(), " phone", StatusFilter::All);
        assert!(view.nodes.is_empty());
        assert_eq!(view.empty_state, Some(EmptyState::NoMatches));

        let view = render(&electronics(), "phone", StatusFilter::All);
        assert_eq!(ids(&view.nodes), vec!["1", "2"]);
    }

    #[test]
    fn test_grandchild_match_does_not_reach_grandparent() {
        let view = render(&three_levels(), "kettle", StatusFilter::All);
        assert!(view.nodes.is_empty());
        assert_eq!(view.empty_state, Some(EmptyState::NoMatches));
        assert_eq!(view.visible_nodes, 0);
    }

    #[test]
    fn test_unrendered_middle_hides_its_subtree() {
        // "home" matches the top node only; kitchen is neither shown nor a
        // parent of a shown node, so kettles disappears with it
        let view = render(&three_levels(), "home", StatusFilter::All);
        assert_eq!(ids(&view.nodes), vec!["top"]);
        assert!(view.nodes[0].expanded);
        assert_eq!(view.nodes[0].child_count, 1);
    }

    #[test]
    fn test_status_filter_partitions_flat_forest() {
        let forest: Vec<Category> = serde_json::from_value(json!([
            {"id": "a", "name": "A", "slug": "a", "status": 1},
            {"id": "b", "name": "B", "slug": "b", "status": 0},
            {"id": "c", "name": "C", "slug": "c", "status": 1}
        ]))
        .unwrap();

        let active = render(&forest, "", StatusFilter::Active);
        let inactive = render(&forest, "", StatusFilter::Inactive);

        assert_eq!(ids(&active.nodes), vec!["a", "c"]);
        assert_eq!(ids(&inactive.nodes), vec!["b"]);
        assert!(active.nodes.iter().all(|n| n.status == 1 && n.matched));
        assert!(inactive.nodes.iter().all(|n| n.status == 0 && n.matched));
    }

    #[test]
    fn test_matched_nodes_carry_filtered_status() {
        let view = render(&electronics(), "", StatusFilter::Active);
        // Phones is inactive, so Electronics renders only for itself
        assert_eq!(ids(&view.nodes), vec!["1"]);

        let view = render(&electronics(), "", StatusFilter::Inactive);
        assert_eq!(ids(&view.nodes), vec!["1", "2"]);
        let phones = &view.nodes[0].children[0];
        assert!(phones.matched);
        assert_eq!(phones.status, 0);
        assert!(!view.nodes[0].matched);
    }

    #[test]
    fn test_electronics_phones_scenario() {
        let view = render(&electronics(), "phone", StatusFilter::All);

        assert_eq!(ids(&view.nodes), vec!["1", "2"]);
        let root = &view.nodes[0];
        assert!(!root.matched);
        assert_eq!(root.icon, NodeIcon::Branch);
        assert_eq!(root.status_label, "Active");
        let phones = &root.children[0];
        assert!(phones.matched);
        assert_eq!(phones.status_label, "Inactive");
        assert_eq!(phones.icon, NodeIcon::Leaf);
        assert_eq!(phones.depth, 1);

        let view = render(&electronics(), "phone", StatusFilter::Active);
        assert!(view.nodes.is_empty());
        assert_eq!(view.empty_state, Some(EmptyState::NoMatches));
    }

    #[test]
    fn test_collapsed_node_keeps_counts() {
        let collapsed: HashSet<String> = ["top".to_string()].into_iter().collect();
        let view = render_tree(&three_levels(), &TreeFilter::default(), &collapsed);

        let top = &view.nodes[0];
        assert!(top.expandable);
        assert!(!top.expanded);
        assert!(top.children.is_empty());
        assert_eq!(top.child_count, 1);
        assert_eq!(view.visible_nodes, 3);
    }

    #[test]
    fn test_empty_hierarchy() {
        let view = render(&[], "anything", StatusFilter::Active);
        assert_eq!(view.empty_state, Some(EmptyState::NoCategories));
        assert_eq!(view.total_nodes, 0);
    }

    #[test]
    fn test_thumbnail_and_description_preview() {
        let long = "x".repeat(150);
        let forest = vec![category(json!({
            "id": "1", "name": "Garden", "slug": "garden",
            "image": "  ", "description": long
        }))];

        let view = render(&forest, "", StatusFilter::All);
        let node = &view.nodes[0];
        assert!(node.thumbnail.is_none());
        let description = node.description.as_deref().unwrap();
        assert_eq!(description.chars().count(), DESCRIPTION_PREVIEW_CHARS + 3);
        assert!(description.ends_with("..."));
    }
}
