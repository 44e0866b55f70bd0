use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Quality ratings outside [0,5] are rejected, never clamped.
    #[error("quality must be between 0 and 5, got {0}")]
    InvalidQuality(u8),

    /// A rating was submitted while the working set is empty.
    #[error("no current item to rate")]
    NoCurrentItem,

    /// Autoplay owns the cursor; manual mutation is rejected until it stops.
    #[error("autoplay is running")]
    AutoplayActive,

    /// A store read or write failed. The in-memory session is only mutated
    /// after a successful write, so this never masks a lost update.
    #[error("persistence failure: {0}")]
    Store(#[from] sqlx::Error),
}
