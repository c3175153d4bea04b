//! Domain types for the shopkeeper inventory core.
//!
//! Pure business objects and rules only. Persistence lives in the
//! `storage` crate, the advisory HTTP client in `advisor`.

pub mod bill;
pub mod errors;
pub mod money;
pub mod product;
pub mod transaction;

pub use bill::{Bill, BillLine};
pub use errors::{DomainError, DomainResult};
pub use money::format_usd;
pub use product::{Product, LOW_STOCK_THRESHOLD};
pub use transaction::{SaleItem, TransactionRecord};
