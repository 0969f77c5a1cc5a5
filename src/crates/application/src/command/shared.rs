use crate::error::AppError;

/// 通用ID生成器接口
#[async_trait::async_trait]
pub trait IdGenerator: Send + Sync {
    /// Returns an identifier that has never been handed out before.
    async fn next_id(&self) -> Result<String, AppError>;
}
