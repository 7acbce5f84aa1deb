//! In-memory collaborators for driving the catalog router in tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use domain_catalog::{
    CatalogError, CatalogResult, CatalogService, Category, CategoryRepository, ImageHost,
    ImageUpload, Product, ProductFilter, ProductRepository, UploadedImage, handlers,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

#[derive(Clone, Default)]
pub struct InMemoryProducts {
    pub rows: Arc<Mutex<Vec<Product>>>,
}

impl InMemoryProducts {
    pub fn all(&self) -> Vec<Product> {
        self.rows.lock().unwrap().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Product> {
        self.all().into_iter().find(|p| p.id == id)
    }

    pub fn seed(&self, product: Product) {
        self.rows.lock().unwrap().push(product);
    }
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn insert(&self, product: &Product) -> CatalogResult<()> {
        self.rows.lock().unwrap().push(product.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        Ok(self.get(id))
    }

    async fn list(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
        Ok(self.all().into_iter().filter(|p| filter.matches(p)).collect())
    }

    async fn replace(&self, product: &Product) -> CatalogResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id == product.id) {
            Some(row) => {
                *row = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCategories {
    pub rows: Arc<Mutex<Vec<Category>>>,
}

impl InMemoryCategories {
    pub fn all(&self) -> Vec<Category> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn insert(&self, category: &Category) -> CatalogResult<()> {
        self.rows.lock().unwrap().push(category.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        Ok(self.all().into_iter().find(|c| c.id == id))
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> CatalogResult<Vec<Category>> {
        Ok(self.all().into_iter().filter(|c| ids.contains(&c.id)).collect())
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        Ok(self.all())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|c| c.id != id);
        Ok(rows.len() < before)
    }
}

/// Image host that records every call and hands out sequential ids.
#[derive(Clone, Default)]
pub struct RecordingImageHost {
    pub uploads: Arc<Mutex<Vec<ImageUpload>>>,
    pub destroyed: Arc<Mutex<Vec<String>>>,
    pub fail: Arc<Mutex<bool>>,
}

impl RecordingImageHost {
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }

    pub fn fail_from_now_on(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl ImageHost for RecordingImageHost {
    async fn upload(&self, image: ImageUpload) -> CatalogResult<UploadedImage> {
        if *self.fail.lock().unwrap() {
            return Err(CatalogError::ImageHost("host unavailable".into()));
        }
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(image);
        let public_id = format!("upload-{}", uploads.len());
        Ok(UploadedImage {
            url: format!("https://img.example.com/{public_id}"),
            public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> CatalogResult<()> {
        if *self.fail.lock().unwrap() {
            return Err(CatalogError::ImageHost("host unavailable".into()));
        }
        self.destroyed.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub products: InMemoryProducts,
    pub categories: InMemoryCategories,
    pub images: RecordingImageHost,
}

impl TestApp {
    pub fn new() -> Self {
        let products = InMemoryProducts::default();
        let categories = InMemoryCategories::default();
        let images = RecordingImageHost::default();
        let service = CatalogService::new(products.clone(), categories.clone(), images.clone());

        Self {
            router: handlers::router(service),
            products,
            categories,
            images,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(Request::delete(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn json(&self, method: &str, uri: &str, body: Value) -> Response<Body> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn multipart(&self, uri: &str, form: MultipartForm) -> Response<Body> {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, form.content_type())
            .body(Body::from(form.finish()))
            .unwrap();
        self.send(request).await
    }
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Hand-built `multipart/form-data` body.
pub struct MultipartForm {
    body: Vec<u8>,
}

const BOUNDARY: &str = "catalog-test-boundary";

impl MultipartForm {
    pub fn new() -> Self {
        Self { body: Vec::new() }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn product_fields(self, name: &str) -> Self {
        self.text("name", name)
            .text("description", "A test product")
            .text("price", "19.99")
            .text("stock", "5")
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}
