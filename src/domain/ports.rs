use crate::domain::model::{FieldFormat, MalformedCardPolicy, Product};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn on_malformed(&self) -> MalformedCardPolicy;
    fn field_format(&self) -> &FieldFormat;
    fn timeout_seconds(&self) -> Option<u64>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Fetch the catalogue page. `None` means the server answered with a
    /// status other than 200.
    async fn extract(&self) -> Result<Option<String>>;
    async fn transform(&self, page: String) -> Result<Vec<Product>>;
    /// Write the products and return the path of the written file.
    async fn load(&self, products: Vec<Product>) -> Result<String>;
}
