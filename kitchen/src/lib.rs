pub mod cook;
pub mod waiter;
