//! In-memory record store and the read-only views computed over it.
//!
//! [`Engine`] owns the collection. Mutations live in `ops::records`, the
//! dashboard and listing queries in `ops::queries`.
use tokio::sync::RwLock;

pub use error::EngineError;
pub use money::Money;
pub use ops::queries::DashboardSummary;
pub use records::{Record, RecordFields, parse_date};

mod error;
mod money;
mod ops;
mod records;

type ResultEngine<T> = Result<T, EngineError>;

/// Default page size of [`Engine::last_n`] and [`Engine::top_expenses`].
pub const DEFAULT_LIMIT: usize = 10;

/// Owner of every record of the process.
///
/// Records are kept in insertion order behind a single lock: each operation
/// takes it once, so readers never observe a half-applied mutation.
#[derive(Debug, Default)]
pub struct Engine {
    records: RwLock<Vec<Record>>,
}

impl Engine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }
}
