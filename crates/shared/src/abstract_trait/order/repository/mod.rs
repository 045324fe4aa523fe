mod transaction;

pub use self::transaction::{
    BoxedCheckoutTransaction, CheckoutTransactionTrait, CheckoutUnitOfWorkTrait,
    DynCheckoutUnitOfWork,
};
