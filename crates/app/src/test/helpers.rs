//! Test Helpers

use crate::domain::{
    accounts::{data::NewUser, records::UserUuid},
    catalog::{
        data::NewProduct,
        records::{CategoryUuid, ProductUuid},
    },
};

pub(crate) fn new_product(uuid: ProductUuid, category: CategoryUuid, price: u64) -> NewProduct {
    NewProduct {
        uuid,
        category_uuid: category,
        name: format!("Product {uuid}"),
        description: String::new(),
        price,
        original_price: None,
        stock: 10,
    }
}

pub(crate) fn new_user(username: &str) -> NewUser {
    NewUser {
        uuid: UserUuid::new(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
    }
}
