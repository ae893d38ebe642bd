use env_logger::Env;
use crate::restaurant::{Restaurant, RestaurantConfig};

mod customer;
mod restaurant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    Restaurant::new(RestaurantConfig::default()).run().await?;
    Ok(())
}
