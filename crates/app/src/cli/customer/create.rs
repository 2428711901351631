use clap::Args;
use storefront_app::domain::customers::{
    CustomersService, SqliteCustomersService, models::NewCustomer,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateCustomerArgs {
    /// Customer email address
    #[arg(long)]
    email: String,

    /// Customer display name
    #[arg(long)]
    name: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateCustomerArgs) -> Result<(), String> {
    let db = args.database.open().await?;

    let customer = SqliteCustomersService::new(db)
        .create_customer(NewCustomer {
            email: args.email,
            name: args.name,
        })
        .await
        .map_err(|error| format!("failed to create customer: {error}"))?;

    println!("customer_id: {}", customer.id);
    println!("customer_email: {}", customer.email);

    Ok(())
}
