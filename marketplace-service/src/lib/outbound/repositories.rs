pub mod account;
pub mod audit;
pub mod memory;
pub mod product;

pub use account::PostgresAccountRepository;
pub use audit::PostgresAuditRepository;
pub use memory::InMemoryAccountRepository;
pub use memory::InMemoryAuditRepository;
pub use memory::InMemoryProductRepository;
pub use product::PostgresProductRepository;
