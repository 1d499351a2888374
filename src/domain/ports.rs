use crate::domain::model::{Plan, PlanRequest};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn model(&self) -> &str;
    fn base_url(&self) -> &str;
    fn api_key(&self) -> Option<String>;
    fn temperature(&self) -> f32;
    fn max_tokens(&self) -> u32;
    fn timeout(&self) -> Duration;
}

#[async_trait]
pub trait PlanGenerator: Send + Sync {
    /// Name recorded on plans this generator produces.
    fn name(&self) -> &str;
    async fn generate(&self, request: &PlanRequest) -> Result<Plan>;
}
