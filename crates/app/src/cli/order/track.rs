use clap::Args;
use storefront_app::domain::orders::{OrdersService, PgOrdersService, records::OrderUuid};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct TrackOrderArgs {
    /// Order to attach the tracking number to
    #[arg(long)]
    order_uuid: Uuid,

    /// Carrier tracking number
    #[arg(long)]
    tracking_number: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: TrackOrderArgs) -> Result<(), String> {
    if args.tracking_number.trim().is_empty() {
        return Err("tracking-number cannot be empty".to_string());
    }

    let db = crate::cli::connect(&args.database_url).await?;

    let order = PgOrdersService::new(db)
        .assign_tracking_number(OrderUuid::from_uuid(args.order_uuid), args.tracking_number)
        .await
        .map_err(|error| format!("failed to assign tracking number: {error}"))?;

    println!("order_uuid: {}", order.uuid);
    println!("order_status: {}", order.status);
    if let Some(tracking_number) = order.tracking_number {
        println!("tracking_number: {tracking_number}");
    }

    Ok(())
}
