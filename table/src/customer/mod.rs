use std::sync::Arc;
use anyhow::{Context, Result};
use common::api::{Meal, Order, OrderIdGenerator};
use common::pace::pace;
use common::tally::Tally;
use kitchen::waiter::{Admission, Waiter};
use log::info;
use crate::restaurant::Timings;

// A customer eats a fixed number of meals and then goes home. Every visit to
// the counter places a fresh order with the waiter; if the waiter stays busy
// for longer than the customer's patience the order is abandoned and the
// customer tries again.
pub struct Customer {
    name: String,
    waiter: Arc<Waiter>,
    ids: Arc<OrderIdGenerator>,
    tally: Arc<Tally>,
    timings: Timings,
    appetite: usize,
}

impl Customer {
    pub fn new(
        name: &str,
        waiter: Arc<Waiter>,
        ids: Arc<OrderIdGenerator>,
        tally: Arc<Tally>,
        timings: Timings,
        appetite: usize,
    ) -> Self {
        Customer {
            name: String::from(name),
            waiter,
            ids,
            tally,
            timings,
            appetite,
        }
    }

    /// Orders until `appetite` meals were eaten and returns them in the order eaten.
    pub async fn visit(self) -> Result<Vec<Meal>> {
        let mut eaten = Vec::with_capacity(self.appetite);
        while eaten.len() < self.appetite {
            let (order, reply) = Order::new(self.ids.next_id(), &self.name);
            let order_id = order.id;
            info!("{} placed order {}", self.name, order_id);
            self.tally.record_placed();

            let admission = self
                .waiter
                .try_admit(order, self.timings.admission_timeout)
                .await
                .with_context(|| format!("{} could not place order {}", self.name, order_id))?;
            match admission {
                Admission::Admitted => {
                    self.tally.record_admitted();
                    let meal = reply
                        .await
                        .with_context(|| format!("order {} for {} was never served", order_id, self.name))?;
                    pace(
                        self.timings.eating,
                        format!("{} eating cooked order {} prepared by {}", self.name, meal.order_id, meal.prepared_by),
                    )
                    .await;
                    self.tally.record_eaten();
                    eaten.push(meal);
                }
                Admission::TimedOut => {
                    self.tally.record_abandoned();
                    pace(
                        self.timings.abandon_notice,
                        format!("{} waiting too long, abandoning order {}", self.name, order_id),
                    )
                    .await;
                }
            }
        }
        info!("{} going home", self.name);
        Ok(eaten)
    }
}
