use crate::core::Pipeline;
use crate::utils::error::Result;

/// How a run ended when nothing went wrong along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Saved { path: String, count: usize },
    /// The server answered with something other than 200.
    FetchFailed,
    NoProducts,
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Saved { .. } => 0,
            RunOutcome::FetchFailed => 2,
            RunOutcome::NoProducts => 3,
        }
    }
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting catalogue scrape");

        // Fetch
        println!("Fetching page...");
        let Some(page) = self.pipeline.extract().await? else {
            println!("Could not get HTML content.");
            return Ok(RunOutcome::FetchFailed);
        };

        // Parse
        println!("Parsing products...");
        let products = self.pipeline.transform(page).await?;
        if products.is_empty() {
            tracing::info!("Page contained no product cards");
            println!("No products found.");
            return Ok(RunOutcome::NoProducts);
        }

        // Write
        let count = products.len();
        println!("Found {} products. Saving to CSV...", count);
        let path = self.pipeline.load(products).await?;
        println!("✅ Data saved to {}", path);
        tracing::info!("Saved {} products to {}", count, path);

        Ok(RunOutcome::Saved { path, count })
    }
}
