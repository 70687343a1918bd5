use super::model::SentimentAnalysisModel;
use super::pipeline::SentimentAnalysisPipeline;
use crate::core::{global_cache, ModelOptions};
use crate::models::implementations::bert::{
    BertSentimentModel, BertSentimentOptions, LocalModelFiles,
};
use crate::pipelines::utils::{build_cache_key, DeviceRequest};

pub struct SentimentAnalysisPipelineBuilder<M: SentimentAnalysisModel> {
    options: M::Options,
    device_request: DeviceRequest,
}

impl<M: SentimentAnalysisModel> SentimentAnalysisPipelineBuilder<M> {
    pub fn new(options: M::Options) -> Self {
        Self {
            options,
            device_request: DeviceRequest::Default,
        }
    }

    pub fn cpu(mut self) -> Self {
        self.device_request = DeviceRequest::Cpu;
        self
    }

    pub fn cuda_device(mut self, index: usize) -> Self {
        self.device_request = DeviceRequest::Cuda(index);
        self
    }

    pub fn device(mut self, device: candle_core::Device) -> Self {
        self.device_request = DeviceRequest::Explicit(device);
        self
    }

    /// Loads (or reuses from the global cache) the model and its tokenizer.
    pub fn build(self) -> anyhow::Result<SentimentAnalysisPipeline<M>>
    where
        M: Clone + Send + Sync + 'static,
        M::Options: ModelOptions,
    {
        let device = self.device_request.resolve()?;
        let key = build_cache_key(&self.options, &device);
        let model = global_cache().get_or_create(&key, || M::new(self.options.clone(), device))?;
        let tokenizer = model.get_tokenizer(self.options)?;
        Ok(SentimentAnalysisPipeline { model, tokenizer })
    }
}

impl SentimentAnalysisPipelineBuilder<BertSentimentModel> {
    /// `nlptown/bert-base-multilingual-uncased-sentiment`, five star labels.
    pub fn nlptown() -> Self {
        Self::new(BertSentimentOptions::nlptown())
    }

    /// Overrides the Hugging Face repository.
    pub fn model_id(mut self, id: impl Into<String>) -> Self {
        self.options.model_id = id.into();
        self
    }

    /// Pins a branch, tag or commit.
    pub fn revision(mut self, rev: impl Into<String>) -> Self {
        self.options.revision = rev.into();
        self
    }

    /// Loads config, weights and tokenizer from disk instead of the hub.
    pub fn local_files(mut self, files: LocalModelFiles) -> Self {
        self.options.local_files = Some(files);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nlptown_builder_overrides_apply() {
        let builder = SentimentAnalysisPipelineBuilder::nlptown()
            .model_id("me/fork")
            .revision("v2")
            .cpu();
        assert_eq!(builder.options.model_id, "me/fork");
        assert_eq!(builder.options.revision, "v2");
        assert!(matches!(builder.device_request, DeviceRequest::Cpu));
    }
}
