use std::sync::Arc;
use std::time::Duration;
use anyhow::{Context, Result};
use common::api::{Meal, OrderIdGenerator};
use common::tally::{Tally, TallySnapshot};
use futures::future::join_all;
use kitchen::cook::Cook;
use kitchen::waiter::Waiter;
use log::info;
use tokio::time::Instant;
use crate::customer::Customer;

const COOKS: [&str; 3] = ["Remy", "Colette", "Linguini"];

const CUSTOMERS: [&str; 10] = [
    "Ani", "Bai", "Cat", "Dao", "Eve", "Fay", "Gus", "Hua", "Iza", "Jai",
];

/// Base durations; every paced action takes between half of its base and the full base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub admission_timeout: Duration,
    pub cooking: Duration,
    pub eating: Duration,
    pub abandon_notice: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Timings {
            admission_timeout: Duration::from_secs(7),
            cooking: Duration::from_secs(10),
            eating: Duration::from_secs(2),
            abandon_notice: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RestaurantConfig {
    pub waiter_capacity: usize,
    pub cooks: Vec<String>,
    pub customers: Vec<String>,
    pub meals_per_customer: usize,
    pub timings: Timings,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        RestaurantConfig {
            waiter_capacity: 3,
            cooks: COOKS.iter().map(|name| String::from(*name)).collect(),
            customers: CUSTOMERS.iter().map(|name| String::from(*name)).collect(),
            meals_per_customer: 5,
            timings: Timings::default(),
        }
    }
}

#[derive(Debug)]
pub struct RestaurantReport {
    /// Meals per customer, in seating order.
    pub meals: Vec<(String, Vec<Meal>)>,
    pub tally: TallySnapshot,
}

pub struct Restaurant {
    config: RestaurantConfig,
}

impl Restaurant {
    pub fn new(config: RestaurantConfig) -> Self {
        Restaurant { config }
    }

    /// Opens the restaurant and runs until every customer went home.
    ///
    /// Customers are seated first, then the cooks start. Once every customer
    /// finished the waiter goes off shift, which sends the cooks home too.
    /// "Restaurant closing" is the last thing logged.
    pub async fn run(self) -> Result<RestaurantReport> {
        let config = self.config;
        let opened = Instant::now();
        let waiter = Arc::new(Waiter::new(config.waiter_capacity));
        let ids = Arc::new(OrderIdGenerator::new());
        let tally = Arc::new(Tally::default());
        info!("Restaurant opening, waiter holds up to {} orders", waiter.capacity());

        let mut seated = Vec::with_capacity(config.customers.len());
        for name in config.customers.iter() {
            let customer = Customer::new(
                name,
                waiter.clone(),
                ids.clone(),
                tally.clone(),
                config.timings,
                config.meals_per_customer,
            );
            seated.push((name.clone(), tokio::spawn(customer.visit())));
        }

        let shifts = config
            .cooks
            .iter()
            .map(|name| tokio::spawn(Cook::new(name, waiter.clone(), config.timings.cooking, tally.clone()).work()))
            .collect::<Vec<_>>();

        let (names, visits): (Vec<String>, Vec<_>) = seated.into_iter().unzip();
        let visits = join_all(visits).await;

        waiter.close();
        for shift in join_all(shifts).await {
            shift.context("a cook walked out mid-shift")?;
        }

        let mut meals = Vec::with_capacity(names.len());
        for (name, visit) in names.into_iter().zip(visits) {
            let eaten = visit
                .with_context(|| format!("{} left the restaurant abruptly", name))?
                .with_context(|| format!("{} did not finish their visit", name))?;
            meals.push((name, eaten));
        }

        let tally = tally.snapshot();
        info!(
            "placed {} orders: {} admitted, {} abandoned, {} cooked, {} eaten",
            tally.placed, tally.admitted, tally.abandoned, tally.cooked, tally.eaten
        );
        info!("Served {} customers in {:.2?}", meals.len(), opened.elapsed());
        info!("Restaurant closing");
        Ok(RestaurantReport { meals, tally })
    }
}
