//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::theme;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Storefront admin API: products, categories and product images"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_catalog::ApiDoc),
        (path = "/api", api = theme::ThemeDoc)
    ),
    tags(
        (name = "Products", description = "Product and product image management"),
        (name = "Categories", description = "Category management"),
        (name = "Storefront", description = "Style constants for the mobile storefront")
    )
)]
pub struct ApiDoc;
