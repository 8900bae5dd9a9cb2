use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides access to a human-friendly entity name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Lifecycle hooks for records that sit in the recycle bin between deletion
/// and permanent removal.
pub trait SoftDelete {
    fn deleted_at(&self) -> Option<DateTime<Utc>>;
    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>);

    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    fn mark_deleted(&mut self) {
        self.set_deleted_at(Some(Utc::now()));
    }

    fn restore(&mut self) {
        self.set_deleted_at(None);
    }
}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use rust_decimal;
pub use serde;
pub use uuid;
