//! SQLite persistence for the shop: catalog, checkout, transaction log
//! and reporting queries, all behind one connection-pooled store.

pub mod catalog;
pub mod checkout;
pub mod reporting;
pub mod store;
pub mod transactions;

pub use reporting::{DailyRevenue, DashboardStats, TopSeller};
pub use store::InventoryStore;
