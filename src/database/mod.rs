mod db;
#[cfg(test)]
pub mod memory;
mod mongo;
mod store;

pub use db::connect_to_mongo;
pub use mongo::MongoStore;
pub use store::BlogStore;
