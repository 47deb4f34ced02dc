mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;
