use std::sync::Arc;
use std::time::Duration;
use common::pace::pace;
use common::tally::Tally;
use log::{info, warn};
use crate::waiter::{Waiter, WaiterError};

// A cook takes the next outstanding order from the waiter, cooks it and sends
// the meal back through the order's reply channel.
pub struct Cook {
    name: String,
    waiter: Arc<Waiter>,
    cooking_time: Duration,
    tally: Arc<Tally>,
}

impl Cook {
    pub fn new(name: &str, waiter: Arc<Waiter>, cooking_time: Duration, tally: Arc<Tally>) -> Self {
        Cook {
            name: String::from(name),
            waiter,
            cooking_time,
            tally,
        }
    }

    /// Works until the waiter goes off shift and returns how many orders were cooked.
    pub async fn work(self) -> usize {
        info!("{} starting work", self.name);
        let mut cooked = 0;
        loop {
            let order = match self.waiter.take().await {
                Ok(order) => order,
                Err(WaiterError::Closed) => break,
            };
            pace(self.cooking_time, format!("{} cooking order {} for {}", self.name, order.id, order.customer)).await;
            self.tally.record_cooked();
            cooked += 1;
            if let Err(meal) = order.fulfill(&self.name) {
                warn!("{} finished order {} but {} is gone", self.name, meal.order_id, meal.customer);
            }
        }
        info!("{} going off shift after {} orders", self.name, cooked);
        cooked
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use common::api::{Order, OrderId};
    use common::tally::Tally;
    use crate::cook::Cook;
    use crate::waiter::Waiter;

    const PATIENCE: Duration = Duration::from_secs(7);

    #[tokio::test(start_paused = true)]
    async fn test_cook_serves_orders_in_turn() {
        let waiter = Arc::new(Waiter::new(3));
        let tally = Arc::new(Tally::default());
        let cook = Cook::new("Remy", waiter.clone(), Duration::from_secs(10), tally.clone());
        let shift = tokio::spawn(cook.work());

        let (first, first_reply) = Order::new(OrderId(1), "Ani");
        let (second, second_reply) = Order::new(OrderId(2), "Bai");
        assert!(waiter.try_admit(first, PATIENCE).await.unwrap().is_admitted());
        assert!(waiter.try_admit(second, PATIENCE).await.unwrap().is_admitted());

        let meal = first_reply.await.unwrap();
        assert_eq!(meal.order_id, OrderId(1));
        assert_eq!(meal.customer, "Ani");
        assert_eq!(meal.prepared_by, "Remy");

        let meal = second_reply.await.unwrap();
        assert_eq!(meal.order_id, OrderId(2));
        assert_eq!(meal.prepared_by, "Remy");

        waiter.close();
        assert_eq!(shift.await.unwrap(), 2);
        assert_eq!(tally.snapshot().cooked, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cook_keeps_working_when_customer_leaves() {
        let waiter = Arc::new(Waiter::new(3));
        let tally = Arc::new(Tally::default());
        let shift = tokio::spawn(Cook::new("Colette", waiter.clone(), Duration::from_secs(10), tally.clone()).work());

        let (gone, gone_reply) = Order::new(OrderId(1), "Cat");
        drop(gone_reply);
        let (staying, staying_reply) = Order::new(OrderId(2), "Dao");
        assert!(waiter.try_admit(gone, PATIENCE).await.unwrap().is_admitted());
        assert!(waiter.try_admit(staying, PATIENCE).await.unwrap().is_admitted());

        assert_eq!(staying_reply.await.unwrap().prepared_by, "Colette");
        waiter.close();
        assert_eq!(shift.await.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_order_is_cooked_once() {
        let waiter = Arc::new(Waiter::new(3));
        let tally = Arc::new(Tally::default());
        let shifts = ["Remy", "Colette", "Linguini"]
            .iter()
            .map(|name| tokio::spawn(Cook::new(name, waiter.clone(), Duration::from_secs(10), tally.clone()).work()))
            .collect::<Vec<_>>();

        let mut replies = Vec::new();
        for id in 1..=12 {
            let (order, reply) = Order::new(OrderId(id), "Eve");
            assert!(waiter.try_admit(order, Duration::from_secs(60)).await.unwrap().is_admitted());
            replies.push(reply);
        }
        for (expected, reply) in (1..=12).zip(replies) {
            assert_eq!(reply.await.unwrap().order_id, OrderId(expected));
        }

        waiter.close();
        let mut cooked = 0;
        for shift in shifts {
            cooked += shift.await.unwrap();
        }
        assert_eq!(cooked, 12);
        assert_eq!(tally.snapshot().cooked, 12);
    }
}
