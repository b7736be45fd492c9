use clap::Args;
use storefront_app::domain::catalog::{
    CatalogService, PgCatalogService,
    data::NewProduct,
    records::{CategoryUuid, ProductUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Category the product is listed under
    #[arg(long)]
    category_uuid: Uuid,

    /// Price in minor units (cents)
    #[arg(long)]
    price: u64,

    /// Pre-markdown price in minor units (cents)
    #[arg(long)]
    original_price: Option<u64>,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Product description
    #[arg(long, default_value = "")]
    description: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let product = PgCatalogService::new(db)
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            category_uuid: CategoryUuid::from_uuid(args.category_uuid),
            name: args.name,
            description: args.description,
            price: args.price,
            original_price: args.original_price,
            stock: args.stock,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_uuid: {}", product.uuid);
    println!("product_name: {}", product.name);
    println!("product_price: {}", product.price);

    Ok(())
}
