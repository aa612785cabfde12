//! 两种存储共用的 ID 分配场景

use product_catalog::{NewProduct, ProductId, ProductRepository};

fn id(value: u64) -> ProductId {
    ProductId::new(value).unwrap()
}

/// 插入 5 条、删除 4 和 5、显式重新插入 4 后，下一个自动 ID
pub async fn next_auto_id_after_reinsert(repo: &dyn ProductRepository) -> u64 {
    for i in 0..5 {
        repo.insert(NewProduct::new(format!("row-{i}"), 1.0))
            .await
            .unwrap();
    }
    repo.delete(id(4)).await.unwrap();
    repo.delete(id(5)).await.unwrap();
    repo.insert(NewProduct::new("again", 1.0).with_id(id(4)))
        .await
        .unwrap();

    repo.insert(NewProduct::new("next", 1.0))
        .await
        .unwrap()
        .id
        .get()
}

/// 空表上先显式插入 1，下一个自动 ID
pub async fn next_auto_id_after_explicit_first(repo: &dyn ProductRepository) -> u64 {
    repo.insert(NewProduct::new("first", 1.0).with_id(id(1)))
        .await
        .unwrap();

    repo.insert(NewProduct::new("second", 1.0))
        .await
        .unwrap()
        .id
        .get()
}
