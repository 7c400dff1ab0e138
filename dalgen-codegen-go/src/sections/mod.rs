//! Per-table section emitters, in the fixed output order: shared query
//! prelude, then per table constants, record struct, query builder, DAO, and
//! finally the database aggregate.

mod constants;
mod dao;
mod database;
mod entity;
mod prelude;
mod query;

pub use constants::ConstantsSection;
pub use dao::DaoSection;
pub use database::DatabaseSection;
pub use entity::EntitySection;
pub use prelude::QueryPrelude;
pub use query::QuerySection;
