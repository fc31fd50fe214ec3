//! Cache engines - MongoDB and in-memory fallback.

mod memory;

pub use memory::InMemoryCache;

#[cfg(feature = "mongodb")]
mod mongo;
#[cfg(feature = "mongodb")]
pub use self::mongo::{
    COLLECTION_NAME, MongoCache, MongoCacheOptions, MongoConnection, database_name,
};

#[cfg(test)]
mod contract;
