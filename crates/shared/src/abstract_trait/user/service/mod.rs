mod query;

pub use self::query::{DynUserQueryService, UserQueryServiceTrait};
