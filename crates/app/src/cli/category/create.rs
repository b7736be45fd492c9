use clap::Args;
use storefront_app::domain::catalog::{
    CatalogService, PgCatalogService, data::NewCategory, records::CategoryUuid,
};

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// Category display name
    #[arg(long)]
    name: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    let db = crate::cli::connect(&args.database_url).await?;

    let category = PgCatalogService::new(db)
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_uuid: {}", category.uuid);
    println!("category_name: {}", category.name);

    Ok(())
}
