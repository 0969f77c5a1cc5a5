use application::command::shared::IdGenerator;
use application::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Random v4 UUIDs in their hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdGenerator for UuidIdGenerator {
    async fn next_id(&self) -> Result<String, AppError> {
        Ok(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tokio::runtime::Runtime;

    #[test]
    fn test_uuid_id_generator() {
        let rt = Runtime::new().unwrap();
        let generator = UuidIdGenerator::new();

        let mut ids = HashSet::new();
        for _ in 0..1000 {
            let id = rt.block_on(generator.next_id()).unwrap();
            assert_eq!(id.len(), 36);
            assert!(Uuid::parse_str(&id).is_ok());
            assert!(ids.insert(id.clone()), "ID重复: {}", id);
        }
    }
}
