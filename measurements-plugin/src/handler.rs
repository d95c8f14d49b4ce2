use measurements_model::Entity;

/// Hooks the host calls around product template entities.
///
/// Every hook defaults to a no-op, so an implementation only overrides what
/// it needs:
/// - [`validate`](Self::validate) rejects a write
/// - [`on_after_load`](Self::on_after_load) computes derived fields after a
///   read
/// - [`on_field_change`](Self::on_field_change) recomputes the fields that
///   depend on an edited one
pub trait TemplateHandler: Send + Sync {
    /// Validate an entity before it is persisted.
    /// Return `Err(message)` to reject the write.
    fn validate(&self, entity: &Entity) -> Result<(), String> {
        let _ = entity;
        Ok(())
    }

    /// Called after loading an entity from storage, before returning it to
    /// the caller.
    fn on_after_load(&self, entity: &mut Entity) -> Result<(), String> {
        let _ = entity;
        Ok(())
    }

    /// Called when the field named `field` was edited.
    fn on_field_change(&self, entity: &mut Entity, field: &str) -> Result<(), String> {
        let _ = (entity, field);
        Ok(())
    }
}
