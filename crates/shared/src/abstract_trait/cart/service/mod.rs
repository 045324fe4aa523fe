mod checkout;

pub use self::checkout::{CheckoutServiceTrait, DynCheckoutService};
