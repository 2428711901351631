use clap::Args;
use storefront_app::domain::products::{
    ProductsService, SqliteProductsService, models::NewProduct,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Catalog category, matched against campaign categories
    #[arg(long)]
    category: String,

    /// Unit price in minor currency units
    #[arg(long)]
    price: u64,

    /// Initial stock level
    #[arg(long, default_value_t = 0)]
    stock: u64,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let db = args.database.open().await?;

    let product = SqliteProductsService::new(db)
        .create_product(NewProduct {
            category: args.category,
            price: args.price,
            stock: args.stock,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_id: {}", product.id);
    println!("product_category: {}", product.category);
    println!("product_stock: {}", product.stock);

    Ok(())
}
