use crate::domain::model::{CompletionRequest, DoctorProfiles, ResponseMode};
use crate::utils::error::Result;
use async_trait::async_trait;

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
    fn api_base(&self) -> &str;
    fn profiles_path(&self) -> &str;
    fn response_mode(&self) -> ResponseMode;
    fn timeout_seconds(&self) -> Option<u64>;
}

#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn load_profiles(&self) -> Result<DoctorProfiles>;
}

/// A hosted completion endpoint that returns schema-constrained text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
