//! Repository tests against a real MongoDB started with testcontainers.
//!
//! Run with `cargo test -p domain_catalog --test mongodb_test -- --ignored`
//! on a machine with Docker.

use domain_catalog::models::ValidProduct;
use domain_catalog::mongodb::{MongoCategoryRepository, MongoProductRepository, init_indexes};
use domain_catalog::*;
use ::mongodb::{Client, Database};
use serde_json::json;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;
use uuid::Uuid;

/// Owns the container; it is removed when this is dropped.
struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    db: Database,
}

impl TestMongo {
    async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let client = Client::with_uri_str(format!("mongodb://127.0.0.1:{port}"))
            .await
            .expect("Failed to connect to MongoDB");
        let db = client.database("catalog_test");
        init_indexes(&db).await.expect("Failed to create indexes");

        Self { container, db }
    }

    fn products(&self) -> MongoProductRepository {
        MongoProductRepository::new(&self.db)
    }

    fn categories(&self) -> MongoCategoryRepository {
        MongoCategoryRepository::new(&self.db)
    }
}

fn product(name: &str, category: Option<Uuid>) -> Product {
    Product::new(
        ValidProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            category,
            price: 12.5,
            stock: 4,
        },
        ProductImage::from(UploadedImage {
            public_id: format!("shop/{name}"),
            url: format!("https://img.example/{name}.png"),
        }),
    )
}

fn category(name: &str) -> Category {
    Category::new(json!({ "category": name }).as_object().cloned().unwrap())
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_insert_and_get_product() {
    let mongo = TestMongo::new().await;
    let repo = mongo.products();
    let lamp = product("lamp", None);

    repo.insert(&lamp).await.unwrap();

    let found = repo.get_by_id(lamp.id).await.unwrap();
    assert_eq!(found, Some(lamp));
    assert_eq!(repo.get_by_id(Uuid::now_v7()).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_replace_and_delete_product() {
    let mongo = TestMongo::new().await;
    let repo = mongo.products();
    let mut lamp = product("lamp", None);
    repo.insert(&lamp).await.unwrap();

    lamp.stock = 0;
    lamp.images.clear();
    assert!(repo.replace(&lamp).await.unwrap());

    let found = repo.get_by_id(lamp.id).await.unwrap().unwrap();
    assert_eq!(found.stock, 0);
    assert!(found.images.is_empty());

    assert!(!repo.replace(&product("ghost", None)).await.unwrap());

    assert!(repo.delete(lamp.id).await.unwrap());
    assert!(!repo.delete(lamp.id).await.unwrap());
    assert_eq!(repo.get_by_id(lamp.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_list_by_category_scope() {
    let mongo = TestMongo::new().await;
    let repo = mongo.products();
    let lighting = Uuid::now_v7();
    let seating = Uuid::now_v7();

    let lamp = product("lamp", Some(lighting));
    let chair = product("chair", Some(seating));
    let rug = product("rug", None);
    for p in [&lamp, &chair, &rug] {
        repo.insert(p).await.unwrap();
    }

    let assigned = repo
        .list(&ProductFilter::category(CategoryScope::Assigned(lighting)))
        .await
        .unwrap();
    assert_eq!(assigned, vec![lamp.clone()]);

    let unassigned = repo
        .list(&ProductFilter::category(CategoryScope::Unassigned))
        .await
        .unwrap();
    assert_eq!(unassigned, vec![rug.clone()]);

    let all = repo.list(&ProductFilter::default()).await.unwrap();
    assert_eq!(all, vec![lamp, chair, rug]);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_keyword_is_literal_and_case_insensitive() {
    let mongo = TestMongo::new().await;
    let repo = mongo.products();
    for name in ["Desk Lamp", "Floor lamp", "Lamp (2 pack)", "Chair"] {
        repo.insert(&product(name, None)).await.unwrap();
    }

    let names = |products: Vec<Product>| products.into_iter().map(|p| p.name).collect::<Vec<_>>();

    let lamps = repo.list(&ProductFilter::keyword(Some("LAMP"))).await.unwrap();
    assert_eq!(names(lamps), ["Desk Lamp", "Floor lamp", "Lamp (2 pack)"]);

    let literal = repo.list(&ProductFilter::keyword(Some("(2"))).await.unwrap();
    assert_eq!(names(literal), ["Lamp (2 pack)"]);

    let wildcard = repo.list(&ProductFilter::keyword(Some(".*"))).await.unwrap();
    assert!(wildcard.is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_category_round_trip() {
    let mongo = TestMongo::new().await;
    let repo = mongo.categories();
    let shoes = category("Shoes");
    let hats = category("Hats");
    let unused = category("Bags");
    for c in [&shoes, &hats, &unused] {
        repo.insert(c).await.unwrap();
    }

    assert_eq!(repo.get_by_id(shoes.id).await.unwrap(), Some(shoes.clone()));

    let mut joined = repo
        .get_by_ids(&[hats.id, shoes.id, Uuid::now_v7()])
        .await
        .unwrap();
    joined.sort_by_key(|c| c.id);
    let mut expected = vec![shoes.clone(), hats.clone()];
    expected.sort_by_key(|c| c.id);
    assert_eq!(joined, expected);
    assert!(repo.get_by_ids(&[]).await.unwrap().is_empty());

    assert_eq!(repo.list().await.unwrap(), vec![shoes.clone(), hats, unused]);

    assert!(repo.delete(shoes.id).await.unwrap());
    assert_eq!(repo.get_by_id(shoes.id).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_delete_category_detaches_stored_products() {
    let mongo = TestMongo::new().await;
    let shoes = category("Shoes");
    mongo.categories().insert(&shoes).await.unwrap();
    let boot = product("boot", Some(shoes.id));
    mongo.products().insert(&boot).await.unwrap();

    let service = CatalogService::new(mongo.products(), mongo.categories(), NoImages);
    service.delete_category(shoes.id).await.unwrap();

    let stored = mongo.products().get_by_id(boot.id).await.unwrap().unwrap();
    assert_eq!(stored.category, None);
    assert_eq!(mongo.categories().get_by_id(shoes.id).await.unwrap(), None);
}

struct NoImages;

#[async_trait::async_trait]
impl ImageHost for NoImages {
    async fn upload(&self, _image: ImageUpload) -> CatalogResult<UploadedImage> {
        unreachable!("no uploads in repository tests")
    }

    async fn destroy(&self, _public_id: &str) -> CatalogResult<()> {
        unreachable!("no deletions in repository tests")
    }
}
