use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::brands::{dtos as brands_dtos, handlers as brands_handlers};
use crate::features::categories::{
    dtos as categories_dtos, handlers as categories_handlers, tree as categories_tree,
};
use crate::features::contact::{
    dtos as contact_dtos, handlers as contact_handlers, models as contact_models,
};
use crate::features::coupons::{
    dtos as coupons_dtos, handlers as coupons_handlers, models as coupons_models,
};
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::product_types::{
    dtos as product_types_dtos, handlers as product_types_handlers,
};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::shared::constants::AUTH_COOKIE_NAME;
use crate::shared::types::{ApiResponse, EntityStats, Meta, StatusFilter};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::generate_otp,
        auth_handlers::sign_in,
        auth_handlers::sign_up,
        auth_handlers::get_me,
        auth_handlers::logout,
        // Categories
        categories_handlers::get_category_tree,
        categories_handlers::list_categories,
        categories_handlers::get_category_stats,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Products
        products_handlers::list_products,
        products_handlers::filter_products,
        products_handlers::get_product_stats,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        products_handlers::list_variants,
        products_handlers::create_variant,
        products_handlers::update_variant,
        products_handlers::delete_variant,
        // Brands
        brands_handlers::list_brands,
        brands_handlers::get_brand_stats,
        brands_handlers::get_brand,
        brands_handlers::create_brand,
        brands_handlers::update_brand,
        brands_handlers::delete_brand,
        // Product types
        product_types_handlers::list_product_types,
        product_types_handlers::get_product_type_stats,
        product_types_handlers::get_product_type,
        product_types_handlers::create_product_type,
        product_types_handlers::update_product_type,
        product_types_handlers::delete_product_type,
        // Coupons
        coupons_handlers::list_coupons,
        coupons_handlers::get_coupon_stats,
        coupons_handlers::get_coupon,
        coupons_handlers::create_coupon,
        coupons_handlers::update_coupon,
        coupons_handlers::delete_coupon,
        // Contact
        contact_handlers::list_contact_messages,
        contact_handlers::get_contact_stats,
        contact_handlers::get_contact_message,
        contact_handlers::update_contact_status,
        contact_handlers::delete_contact_message,
        // Dashboard
        dashboard_handlers::get_summary,
    ),
    components(
        schemas(
            // Shared
            Meta,
            EntityStats,
            StatusFilter,
            ApiResponse<EntityStats>,
            // Auth
            auth_dtos::GenerateOtpDto,
            auth_dtos::SignInDto,
            auth_dtos::SignUpDto,
            auth_dtos::AdminDto,
            auth_dtos::SessionDto,
            ApiResponse<auth_dtos::AdminDto>,
            ApiResponse<auth_dtos::SessionDto>,
            // Categories
            categories_tree::NodeIcon,
            categories_tree::EmptyState,
            categories_tree::CategoryNodeView,
            categories_tree::CategoryTreeView,
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryDeleteDto,
            ApiResponse<categories_tree::CategoryTreeView>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<categories_dtos::CategoryDeleteDto>,
            // Products
            products_dtos::ProductResponseDto,
            products_dtos::ProductFormDto,
            products_dtos::VariantResponseDto,
            products_dtos::VariantFormDto,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<Vec<products_dtos::VariantResponseDto>>,
            ApiResponse<products_dtos::VariantResponseDto>,
            // Brands
            brands_dtos::BrandResponseDto,
            brands_dtos::BrandFormDto,
            ApiResponse<Vec<brands_dtos::BrandResponseDto>>,
            ApiResponse<brands_dtos::BrandResponseDto>,
            // Product types
            product_types_dtos::ProductTypeResponseDto,
            product_types_dtos::ProductTypeFormDto,
            ApiResponse<Vec<product_types_dtos::ProductTypeResponseDto>>,
            ApiResponse<product_types_dtos::ProductTypeResponseDto>,
            // Coupons
            coupons_models::DiscountType,
            coupons_dtos::CouponResponseDto,
            coupons_dtos::CouponFormDto,
            ApiResponse<Vec<coupons_dtos::CouponResponseDto>>,
            ApiResponse<coupons_dtos::CouponResponseDto>,
            // Contact
            contact_models::ContactStatus,
            contact_dtos::ContactMessageRowDto,
            contact_dtos::ContactMessageResponseDto,
            contact_dtos::UpdateContactStatusDto,
            ApiResponse<Vec<contact_dtos::ContactMessageRowDto>>,
            ApiResponse<contact_dtos::ContactMessageResponseDto>,
            // Dashboard
            dashboard_dtos::DashboardSummaryDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
        )
    ),
    tags(
        (name = "auth", description = "One-time code sign-in and the admin session"),
        (name = "categories", description = "Category hierarchy management"),
        (name = "products", description = "Products and their variants"),
        (name = "brands", description = "Brand management"),
        (name = "product-types", description = "Product types and their attribute names"),
        (name = "coupons", description = "Discount coupons"),
        (name = "contact", description = "Contact form inbox"),
        (name = "dashboard", description = "Overview statistics"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Catalog Admin API",
        version = "0.1.0",
        description = "Admin backend for the product catalog",
    )
)]
pub struct ApiDoc;

/// Adds the credential cookie security scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(AUTH_COOKIE_NAME))),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_every_feature() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/auth/otp/generate",
            "/api/auth/sign-in",
            "/api/auth/logout",
            "/api/categories/tree",
            "/api/products/filter",
            "/api/products/{id}/variants/{variant_id}",
            "/api/brands/{id}",
            "/api/product-types",
            "/api/coupons/stats",
            "/api/contact/{id}/status",
            "/api/dashboard/summary",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("session_cookie"));
    }
}
