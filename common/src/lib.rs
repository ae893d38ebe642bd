pub mod api {
    use std::fmt;
    use std::sync::atomic::{AtomicU64, Ordering};
    use tokio::sync::oneshot;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct OrderId(pub u64);

    impl fmt::Display for OrderId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    /// Hands out order ids, shared between customers through an `Arc`.
    #[derive(Debug, Default)]
    pub struct OrderIdGenerator {
        last: AtomicU64,
    }

    impl OrderIdGenerator {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every call returns an id strictly greater than all ids handed out before it.
        /// The first id is 1.
        pub fn next_id(&self) -> OrderId {
            OrderId(self.last.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    // An order travels from a customer to a cook through the waiter. The reply
    // sender is the customer's private way back; the matching receiver never
    // leaves the customer.
    #[derive(Debug)]
    pub struct Order {
        pub id: OrderId,
        pub customer: String,
        reply: oneshot::Sender<Meal>,
    }

    /// A fulfilled order, as it arrives back at the customer's table.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Meal {
        pub order_id: OrderId,
        pub customer: String,
        pub prepared_by: String,
    }

    impl Order {
        pub fn new(id: OrderId, customer: &str) -> (Order, oneshot::Receiver<Meal>) {
            let (reply, receiver) = oneshot::channel();
            let order = Order {
                id,
                customer: String::from(customer),
                reply,
            };
            (order, receiver)
        }

        /// Marks the order as prepared by `cook` and sends the meal back.
        ///
        /// Consumes the order, so it can only ever be fulfilled once. If the
        /// customer stopped waiting the meal is handed back as the error.
        pub fn fulfill(self, cook: &str) -> Result<(), Meal> {
            let meal = Meal {
                order_id: self.id,
                customer: self.customer,
                prepared_by: String::from(cook),
            };
            self.reply.send(meal)
        }
    }
}

pub mod tally {
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Event counters shared by every customer and cook.
    #[derive(Debug, Default)]
    pub struct Tally {
        placed: AtomicU64,
        admitted: AtomicU64,
        abandoned: AtomicU64,
        cooked: AtomicU64,
        eaten: AtomicU64,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TallySnapshot {
        pub placed: u64,
        pub admitted: u64,
        pub abandoned: u64,
        pub cooked: u64,
        pub eaten: u64,
    }

    impl Tally {
        pub fn record_placed(&self) {
            self.placed.fetch_add(1, Ordering::Relaxed);
        }

        pub fn record_admitted(&self) {
            self.admitted.fetch_add(1, Ordering::Relaxed);
        }

        pub fn record_abandoned(&self) {
            self.abandoned.fetch_add(1, Ordering::Relaxed);
        }

        pub fn record_cooked(&self) {
            self.cooked.fetch_add(1, Ordering::Relaxed);
        }

        pub fn record_eaten(&self) {
            self.eaten.fetch_add(1, Ordering::Relaxed);
        }

        pub fn snapshot(&self) -> TallySnapshot {
            TallySnapshot {
                placed: self.placed.load(Ordering::Relaxed),
                admitted: self.admitted.load(Ordering::Relaxed),
                abandoned: self.abandoned.load(Ordering::Relaxed),
                cooked: self.cooked.load(Ordering::Relaxed),
                eaten: self.eaten.load(Ordering::Relaxed),
            }
        }
    }
}

pub mod pace {
    use log::info;
    use rand::Rng;
    use std::time::Duration;

    /// Logs `message`, then sleeps somewhere between half of `base` and `base`.
    pub async fn pace(base: Duration, message: String) {
        info!("{}", message);
        tokio::time::sleep(jitter(base)).await;
    }

    /// Uniform over `[base / 2, base)`, drawn in whole nanoseconds.
    pub fn jitter(base: Duration) -> Duration {
        let nanos = u64::try_from(base.as_nanos()).unwrap_or(u64::MAX);
        if nanos == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos(rand::thread_rng().gen_range(nanos / 2..nanos))
    }
}
