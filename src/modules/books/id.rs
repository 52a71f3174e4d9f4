use uuid::Uuid;

/// Source of fresh book identifiers.
pub trait IdGenerator: Send + Sync {
    /// Return an id that has not been handed out before.
    fn generate(&self) -> String;
}

/// Time-ordered UUIDv7 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidV7Ids;

impl IdGenerator for UuidV7Ids {
    fn generate(&self) -> String {
        Uuid::now_v7().simple().to_string()
    }
}
