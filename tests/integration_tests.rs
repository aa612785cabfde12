mod common;

use product_catalog::infrastructure::InMemoryProductRepository;
use product_catalog::{
    CoreError, NewProduct, ProductChanges, ProductId, ProductService, NAME_MAX_LEN,
};
use std::collections::HashSet;
use std::sync::Arc;

fn service() -> ProductService {
    ProductService::new(Arc::new(InMemoryProductRepository::new()))
}

fn id(value: u64) -> ProductId {
    ProductId::new(value).unwrap()
}

#[tokio::test]
async fn test_create_and_get() {
    let service = service();
    let created = service
        .create(NewProduct::new("Desk lamp", 24.99))
        .await
        .unwrap();

    let fetched = service.get(created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Desk lamp");
    assert_eq!(fetched.price, 24.99);
}

#[tokio::test]
async fn test_name_bounds_through_service() {
    let service = service();

    assert!(service
        .create(NewProduct::new("x".repeat(NAME_MAX_LEN), 1.0))
        .await
        .is_ok());

    let err = service
        .create(NewProduct::new("x".repeat(NAME_MAX_LEN + 1), 1.0))
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = service.create(NewProduct::new("", 1.0)).await.unwrap_err();
    assert!(err.is_validation());

    assert_eq!(service.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_price_accepts_any_float() {
    let service = service();
    for price in [-3.5, 0.0, 1e300, f64::NEG_INFINITY] {
        let p = service.create(NewProduct::new("any", price)).await.unwrap();
        assert_eq!(p.price, price);
    }

    let nan = service
        .create(NewProduct::new("nan", f64::NAN))
        .await
        .unwrap();
    assert!(nan.price.is_nan());
}

#[tokio::test]
async fn test_duplicate_explicit_id_rejected() {
    let service = service();
    service
        .create(NewProduct::new("first", 1.0).with_id(id(5)))
        .await
        .unwrap();

    let err = service
        .create(NewProduct::new("second", 2.0).with_id(id(5)))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::DuplicateId(dup) if dup == id(5)));
    assert_eq!(service.get(id(5)).await.unwrap().name, "first");
}

#[tokio::test]
async fn test_rename_and_reprice() {
    let service = service();
    let p = service.create(NewProduct::new("mug", 8.0)).await.unwrap();

    let renamed = service.rename(p.id, "big mug").await.unwrap();
    assert_eq!(renamed.name, "big mug");
    assert_eq!(renamed.price, 8.0);

    let repriced = service.reprice(p.id, -1.0).await.unwrap();
    assert_eq!(repriced.name, "big mug");
    assert_eq!(repriced.price, -1.0);

    assert!(service.rename(p.id, "").await.unwrap_err().is_validation());
    assert_eq!(service.get(p.id).await.unwrap().name, "big mug");
}

#[tokio::test]
async fn test_update_errors() {
    let service = service();
    let p = service.create(NewProduct::new("pen", 1.0)).await.unwrap();

    let err = service.update(p.id, ProductChanges::new()).await.unwrap_err();
    assert!(err.is_validation());

    let err = service
        .update(id(999), ProductChanges::new().price(2.0))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound(missing) if missing == id(999)));
}

#[tokio::test]
async fn test_remove() {
    let service = service();
    let p = service.create(NewProduct::new("chair", 40.0)).await.unwrap();

    service.remove(p.id).await.unwrap();
    assert!(matches!(
        service.get(p.id).await.unwrap_err(),
        CoreError::NotFound(_)
    ));
    assert!(matches!(
        service.remove(p.id).await.unwrap_err(),
        CoreError::NotFound(_)
    ));
    assert_eq!(service.count().await.unwrap(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_get_unique_ids() {
    let service = service();

    let handles: Vec<_> = (0..64)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create(NewProduct::new(format!("item-{i}"), i as f64))
                    .await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let product = handle.await.unwrap().unwrap();
        assert!(ids.insert(product.id));
    }

    assert_eq!(ids.len(), 64);
    assert_eq!(service.list().await.unwrap().len(), 64);
}

#[tokio::test]
async fn test_memory_store_never_reuses_deleted_ids() {
    let repo = InMemoryProductRepository::new();
    assert_eq!(common::next_auto_id_after_reinsert(&repo).await, 6);

    let repo = InMemoryProductRepository::new();
    assert_eq!(common::next_auto_id_after_explicit_first(&repo).await, 2);
}
