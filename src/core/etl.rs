use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<String> {
        tracing::debug!("Extracting data...");
        let raw_data = self.pipeline.extract()?;

        tracing::debug!("Transforming data...");
        let transformed = self.pipeline.transform(raw_data)?;

        tracing::debug!("Loading data...");
        let summary = self.pipeline.load(transformed)?;

        Ok(summary)
    }
}
