mod transaction;

pub use self::transaction::{PgCheckoutTransaction, PgCheckoutUnitOfWork};
