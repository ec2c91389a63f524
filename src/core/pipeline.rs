use crate::core::extractor::extract_products;
use crate::core::writer::to_csv_bytes;
use crate::core::{ConfigProvider, Pipeline, Product, Storage};
use crate::utils::error::Result;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub struct CataloguePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> CataloguePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CataloguePipeline<S, C> {
    async fn extract(&self) -> Result<Option<String>> {
        tracing::debug!("Requesting catalogue page: {}", self.config.url());
        let response = self.client.get(self.config.url()).send().await?;

        let status = response.status();
        tracing::debug!("Catalogue response status: {}", status);

        if status != StatusCode::OK {
            tracing::warn!("⚠️ {} answered with status {}", self.config.url(), status);
            println!("Failed to fetch page: {}", status.as_u16());
            return Ok(None);
        }

        let body = response.text().await?;
        tracing::debug!("Fetched {} bytes of markup", body.len());
        Ok(Some(body))
    }

    async fn transform(&self, page: String) -> Result<Vec<Product>> {
        extract_products(
            &page,
            self.config.on_malformed(),
            self.config.field_format(),
        )
    }

    async fn load(&self, products: Vec<Product>) -> Result<String> {
        let data = to_csv_bytes(&products)?;

        tracing::debug!(
            "Writing {} rows ({} bytes) to {}",
            products.len(),
            data.len(),
            self.config.output_path()
        );
        let written = self
            .storage
            .write_file(self.config.output_path(), &data)
            .await?;

        tracing::debug!("CSV file saved successfully");
        Ok(written)
    }
}
