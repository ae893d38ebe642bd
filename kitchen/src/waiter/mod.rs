use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::fmt::Formatter;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use common::api::Order;
use log::debug;
use tokio::sync::Semaphore;
use tokio::time;

/// Outcome of a single attempt to hand an order to the waiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted,
    TimedOut,
}

#[cfg(test)]
impl Admission {
    pub fn is_admitted(&self) -> bool {
        *self == Admission::Admitted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaiterError {
    Closed,
}

impl fmt::Display for WaiterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            WaiterError::Closed => write!(f, "WaiterError: waiter is off shift"),
        }
    }
}
impl Error for WaiterError {}

// The waiter holds onto outstanding orders until a cook is free to take them.
//
// `free_slots` carries one permit per empty slot and `ready` one permit per
// queued order. An order is only pushed after a slot permit was acquired, and a
// slot permit is only returned after the order left the queue, so the queue
// never grows past `capacity`.
#[derive(Debug)]
pub struct Waiter {
    capacity: usize,
    orders: Mutex<VecDeque<Order>>,
    free_slots: Semaphore,
    ready: Semaphore,
}

impl Waiter {
    /// A waiter holding at most `capacity` orders. A capacity of zero never admits anything.
    pub fn new(capacity: usize) -> Self {
        Waiter {
            capacity,
            orders: Mutex::new(VecDeque::with_capacity(capacity)),
            free_slots: Semaphore::new(capacity),
            ready: Semaphore::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of admitted orders no cook has taken yet.
    pub fn len(&self) -> usize {
        self.queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }

    /// Waits up to `timeout` for a free slot and queues `order` in it.
    ///
    /// Acquiring the slot and the deadline race inside one `timeout`, so an
    /// attempt is either admitted or timed out, never both. A timed out order
    /// is dropped here and never reaches a cook.
    pub async fn try_admit(&self, order: Order, timeout: Duration) -> Result<Admission, WaiterError> {
        let slot = match time::timeout(timeout, self.free_slots.acquire()).await {
            Err(_elapsed) => {
                debug!("order {} for {} not admitted within {:?}", order.id, order.customer, timeout);
                return Ok(Admission::TimedOut);
            }
            Ok(Err(_closed)) => return Err(WaiterError::Closed),
            Ok(Ok(slot)) => slot,
        };
        // the slot is given back by `take`
        slot.forget();
        self.queue().push_back(order);
        self.ready.add_permits(1);
        Ok(Admission::Admitted)
    }

    /// Waits for an order and removes the oldest one.
    pub async fn take(&self) -> Result<Order, WaiterError> {
        let ready = self.ready.acquire().await.map_err(|_| WaiterError::Closed)?;
        ready.forget();
        let order = self.queue().pop_front();
        self.free_slots.add_permits(1);
        order.ok_or(WaiterError::Closed)
    }

    /// Sends the waiter off shift: every pending and future `take` or
    /// `try_admit` returns `WaiterError::Closed`.
    pub fn close(&self) {
        self.free_slots.close();
        self.ready.close();
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<Order>> {
        self.orders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
