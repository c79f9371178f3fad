//! Entity trait - common interface for parts and products

/// Common trait for all inventory entities
pub trait Entity {
    /// The entity kind shown to users (e.g., "part", "product")
    const KIND: &'static str;

    /// Get the entity's id
    fn id(&self) -> u32;

    /// Get the entity's name
    fn name(&self) -> &str;

    /// Case-insensitive substring match on the name
    fn name_contains(&self, needle: &str) -> bool {
        self.name()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

/// Next id for a collection: one past the largest id, or 0 when empty.
///
/// Ids freed by deletion below the maximum are never handed out again.
/// Returns `None` once the largest id is `u32::MAX`.
pub fn next_id<T: Entity>(items: &[T]) -> Option<u32> {
    match items.iter().map(Entity::id).max() {
        Some(max) => max.checked_add(1),
        None => Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::part::{Part, PartSource};

    fn part(id: u32, name: &str) -> Part {
        Part::new(
            id,
            name,
            1.0,
            1,
            0,
            5,
            PartSource::InHouse { machine_id: 1000 },
        )
    }

    #[test]
    fn test_next_id_empty() {
        let parts: Vec<Part> = Vec::new();
        assert_eq!(next_id(&parts), Some(0));
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        let parts = vec![part(7, "a"), part(2, "b")];
        assert_eq!(next_id(&parts), Some(8));
    }

    #[test]
    fn test_next_id_exhausted() {
        let parts = vec![part(u32::MAX, "last"), part(3, "b")];
        assert_eq!(next_id(&parts), None);

        let parts = vec![part(u32::MAX - 1, "almost")];
        assert_eq!(next_id(&parts), Some(u32::MAX));
    }

    #[test]
    fn test_name_contains_ignores_case() {
        let p = part(0, "Brake Pads");
        assert!(p.name_contains("brake"));
        assert!(p.name_contains("PADS"));
        assert!(!p.name_contains("wheel"));
    }
}
