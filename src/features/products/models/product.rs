use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::types::{deserialize_id, deserialize_optional_id, Filterable, STATUS_ACTIVE};

/// Product as stored by the catalog service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default = "default_status")]
    pub status: i32,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub brand_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub product_type_id: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

fn default_status() -> i32 {
    STATUS_ACTIVE
}

impl Product {
    /// Sale price when it undercuts the list price
    pub fn effective_price(&self) -> Decimal {
        match self.sale_price {
            Some(sale) if sale < self.price => sale,
            _ => self.price,
        }
    }
}

impl Filterable for Product {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.slug.as_str()];
        fields.extend(self.sku.as_deref());
        fields
    }

    fn status_flag(&self) -> Option<i32> {
        Some(self.status)
    }
}

/// One page of `GET /products/filter`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawProductPage")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: i64,
}

/// The filter endpoint has answered with `{products, total}`,
/// `{items, totalCount}` and bare arrays over time
#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductPage {
    Paged {
        #[serde(alias = "products")]
        items: Vec<Product>,
        #[serde(default, alias = "totalCount")]
        total: Option<i64>,
    },
    Bare(Vec<Product>),
}

impl From<RawProductPage> for ProductPage {
    fn from(raw: RawProductPage) -> Self {
        match raw {
            RawProductPage::Paged { items, total } => Self {
                total: total.unwrap_or(items.len() as i64),
                items,
            },
            RawProductPage::Bare(items) => Self {
                total: items.len() as i64,
                items,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product() -> serde_json::Value {
        json!({"id": 1, "name": "Phone X", "slug": "phone-x", "price": "499.00"})
    }

    #[test]
    fn test_page_shapes() {
        let page: ProductPage =
            serde_json::from_value(json!({"products": [product()], "total": 40})).unwrap();
        assert_eq!((page.items.len(), page.total), (1, 40));

        let page: ProductPage =
            serde_json::from_value(json!({"items": [product()], "totalCount": 7})).unwrap();
        assert_eq!(page.total, 7);

        let page: ProductPage = serde_json::from_value(json!([product(), product()])).unwrap();
        assert_eq!(page.total, 2);

        // cached form reads back
        let value = serde_json::to_value(&page).unwrap();
        let back: ProductPage = serde_json::from_value(value).unwrap();
        assert_eq!(back.total, 2);
    }

    #[test]
    fn test_effective_price() {
        let mut p: Product = serde_json::from_value(product()).unwrap();
        assert_eq!(p.effective_price(), Decimal::from(499));

        p.sale_price = Some(Decimal::from(450));
        assert_eq!(p.effective_price(), Decimal::from(450));

        p.sale_price = Some(Decimal::from(600));
        assert_eq!(p.effective_price(), Decimal::from(499));
    }
}
