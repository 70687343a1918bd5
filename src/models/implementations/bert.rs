//! BERT encoder with a sequence classification head.
//!
//! Implements the architecture behind `nlptown/bert-base-multilingual-uncased-sentiment`:
//! - Learned word, position and token type embeddings
//! - Post-norm transformer encoder layers with GELU feed-forward blocks
//! - A tanh pooler over the `[CLS]` token
//! - A linear classifier producing one logit per star rating
//!
//! # Quick Start
//! ```rust,no_run
//! use sense_twitter::models::implementations::bert::{BertSentimentModel, BertSentimentOptions};
//! use candle_core::Device;
//!
//! # fn run() -> anyhow::Result<()> {
//! let options = BertSentimentOptions::nlptown();
//! let model = BertSentimentModel::new(options.clone(), Device::Cpu)?;
//! let tokenizer = BertSentimentModel::load_tokenizer(&options, model.max_len())?;
//! let label_index = model.predict(&tokenizer, "i love this smile")?;
//! # Ok(())
//! # }
//! ```

use crate::core::ModelOptions;
use crate::pipelines::utils::loaders::{TokenizerLoader, WeightsLoader};
use anyhow::{Context, Error as E, Result as AnyhowResult};
use candle_core::{DType, Device, IndexOp, Module, Result, Tensor, D};
use candle_nn::{embedding, layer_norm, linear, ops::softmax, Embedding, LayerNorm, Linear, VarBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokenizers::Tokenizer;

const MIN_VALUE_F64: f64 = f32::MIN as f64;

fn default_layer_norm_eps() -> f64 {
    1e-12
}

fn default_type_vocab_size() -> usize {
    2
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub vocab_size: usize,
    pub hidden_size: usize,
    pub num_hidden_layers: usize,
    pub num_attention_heads: usize,
    pub intermediate_size: usize,
    pub max_position_embeddings: usize,
    #[serde(default = "default_type_vocab_size")]
    pub type_vocab_size: usize,
    #[serde(default = "default_layer_norm_eps")]
    pub layer_norm_eps: f64,
    #[serde(default)]
    pub id2label: HashMap<String, String>,
}

impl Config {
    /// Number of output classes; BERT configs default to two when no labels are given.
    pub fn num_labels(&self) -> usize {
        if self.id2label.is_empty() {
            2
        } else {
            self.id2label.len()
        }
    }
}

/// Older checkpoints name LayerNorm parameters `gamma`/`beta`.
fn load_layer_norm(size: usize, eps: f64, vb: VarBuilder) -> Result<LayerNorm> {
    match layer_norm(size, eps, vb.clone()) {
        Ok(norm) => Ok(norm),
        Err(_) => {
            let weight = vb.get(size, "gamma")?;
            let bias = vb.get(size, "beta")?;
            Ok(LayerNorm::new(weight, bias, eps))
        }
    }
}

#[derive(Debug, Clone)]
struct Embeddings {
    word_embeddings: Embedding,
    position_embeddings: Embedding,
    token_type_embeddings: Embedding,
    norm: LayerNorm,
    span: tracing::Span,
}

impl Embeddings {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        Ok(Self {
            word_embeddings: embedding(
                config.vocab_size,
                config.hidden_size,
                vb.pp("word_embeddings"),
            )?,
            position_embeddings: embedding(
                config.max_position_embeddings,
                config.hidden_size,
                vb.pp("position_embeddings"),
            )?,
            token_type_embeddings: embedding(
                config.type_vocab_size,
                config.hidden_size,
                vb.pp("token_type_embeddings"),
            )?,
            norm: load_layer_norm(config.hidden_size, config.layer_norm_eps, vb.pp("LayerNorm"))?,
            span: tracing::span!(tracing::Level::TRACE, "embeddings"),
        })
    }

    fn forward(&self, input_ids: &Tensor) -> Result<Tensor> {
        let _enter = self.span.enter();
        let seq_len = input_ids.dim(1)?;
        let positions = Tensor::arange(0u32, seq_len as u32, input_ids.device())?.unsqueeze(0)?;
        let token_types = input_ids.zeros_like()?;

        let words = self.word_embeddings.forward(input_ids)?;
        let positions = self.position_embeddings.forward(&positions)?;
        let token_types = self.token_type_embeddings.forward(&token_types)?;

        words
            .broadcast_add(&positions)?
            .add(&token_types)?
            .apply(&self.norm)
    }
}

#[derive(Debug, Clone)]
struct SelfAttention {
    query: Linear,
    key: Linear,
    value: Linear,
    output: Linear,
    norm: LayerNorm,
    num_attention_heads: usize,
    attention_head_size: usize,
    span: tracing::Span,
}

impl SelfAttention {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let hidden = config.hidden_size;
        Ok(Self {
            query: linear(hidden, hidden, vb.pp("self.query"))?,
            key: linear(hidden, hidden, vb.pp("self.key"))?,
            value: linear(hidden, hidden, vb.pp("self.value"))?,
            output: linear(hidden, hidden, vb.pp("output.dense"))?,
            norm: load_layer_norm(hidden, config.layer_norm_eps, vb.pp("output.LayerNorm"))?,
            num_attention_heads: config.num_attention_heads,
            attention_head_size: hidden / config.num_attention_heads,
            span: tracing::span!(tracing::Level::TRACE, "self-attn"),
        })
    }

    fn split_heads(&self, xs: &Tensor) -> Result<Tensor> {
        let (batch, seq_len, _) = xs.dims3()?;
        xs.reshape((
            batch,
            seq_len,
            self.num_attention_heads,
            self.attention_head_size,
        ))?
        .transpose(1, 2)?
        .contiguous()
    }

    fn forward(&self, hidden_states: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let _enter = self.span.enter();
        let (batch, seq_len, hidden_size) = hidden_states.dims3()?;

        let q = self.split_heads(&hidden_states.apply(&self.query)?)?;
        let k = self.split_heads(&hidden_states.apply(&self.key)?)?;
        let v = self.split_heads(&hidden_states.apply(&self.value)?)?;

        let scale = (self.attention_head_size as f64).powf(-0.5);
        let scores = (q.matmul(&k.t()?)? * scale)?.broadcast_add(attention_mask)?;
        let probs = softmax(&scores, D::Minus1)?;

        let context = probs
            .matmul(&v)?
            .transpose(1, 2)?
            .contiguous()?
            .reshape((batch, seq_len, hidden_size))?;

        (context.apply(&self.output)? + hidden_states)?.apply(&self.norm)
    }
}

#[derive(Debug, Clone)]
struct FeedForward {
    intermediate: Linear,
    output: Linear,
    norm: LayerNorm,
}

impl FeedForward {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        Ok(Self {
            intermediate: linear(
                config.hidden_size,
                config.intermediate_size,
                vb.pp("intermediate.dense"),
            )?,
            output: linear(
                config.intermediate_size,
                config.hidden_size,
                vb.pp("output.dense"),
            )?,
            norm: load_layer_norm(
                config.hidden_size,
                config.layer_norm_eps,
                vb.pp("output.LayerNorm"),
            )?,
        })
    }
}

impl Module for FeedForward {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let projected = xs
            .apply(&self.intermediate)?
            .gelu_erf()?
            .apply(&self.output)?;
        (projected + xs)?.apply(&self.norm)
    }
}

#[derive(Debug, Clone)]
struct EncoderLayer {
    attention: SelfAttention,
    feed_forward: FeedForward,
}

impl EncoderLayer {
    fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        Ok(Self {
            attention: SelfAttention::load(vb.pp("attention"), config)?,
            feed_forward: FeedForward::load(vb, config)?,
        })
    }

    fn forward(&self, hidden_states: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        self.attention
            .forward(hidden_states, attention_mask)?
            .apply(&self.feed_forward)
    }
}

/// BERT with pooler and classifier, as saved by `BertForSequenceClassification`.
#[derive(Debug, Clone)]
pub struct BertForSequenceClassification {
    embeddings: Embeddings,
    layers: Vec<EncoderLayer>,
    pooler: Linear,
    classifier: Linear,
    dtype: DType,
}

impl BertForSequenceClassification {
    pub fn load(vb: VarBuilder, config: &Config) -> Result<Self> {
        let bert = vb.pp("bert");
        let embeddings = Embeddings::load(bert.pp("embeddings"), config)?;

        let mut layers = Vec::with_capacity(config.num_hidden_layers);
        for layer_idx in 0..config.num_hidden_layers {
            layers.push(EncoderLayer::load(
                bert.pp(format!("encoder.layer.{layer_idx}")),
                config,
            )?);
        }

        let pooler = linear(config.hidden_size, config.hidden_size, bert.pp("pooler.dense"))?;
        let classifier = linear(config.hidden_size, config.num_labels(), vb.pp("classifier"))?;

        Ok(Self {
            embeddings,
            layers,
            pooler,
            classifier,
            dtype: vb.dtype(),
        })
    }

    /// Padding mask `(batch, seq)` of ones and zeros to an additive `(batch, 1, 1, seq)` mask.
    fn extended_attention_mask(&self, mask: &Tensor) -> Result<Tensor> {
        let inverted = (1.0 - mask.unsqueeze(1)?.unsqueeze(2)?.to_dtype(self.dtype)?)?;
        inverted * MIN_VALUE_F64
    }

    /// Classification logits with shape `(batch_size, num_labels)`.
    pub fn forward(&self, input_ids: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
        let mask = self.extended_attention_mask(attention_mask)?;

        let mut hidden_states = self.embeddings.forward(input_ids)?;
        for layer in &self.layers {
            hidden_states = layer.forward(&hidden_states, &mask)?;
        }

        hidden_states
            .i((.., 0))?
            .apply(&self.pooler)?
            .tanh()?
            .apply(&self.classifier)
    }
}

/// Local copies of the model files, bypassing the Hugging Face hub.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalModelFiles {
    pub config: PathBuf,
    pub weights: PathBuf,
    /// Either a `tokenizer.json` or a WordPiece `vocab.txt`.
    pub tokenizer: PathBuf,
}

/// Which checkpoint to load and from where.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BertSentimentOptions {
    pub model_id: String,
    pub revision: String,
    pub local_files: Option<LocalModelFiles>,
}

impl BertSentimentOptions {
    pub const NLPTOWN: &'static str = "nlptown/bert-base-multilingual-uncased-sentiment";

    /// The five-star multilingual review model.
    pub fn nlptown() -> Self {
        Self {
            model_id: Self::NLPTOWN.to_string(),
            revision: "main".to_string(),
            local_files: None,
        }
    }
}

impl Default for BertSentimentOptions {
    fn default() -> Self {
        Self::nlptown()
    }
}

impl ModelOptions for BertSentimentOptions {
    fn cache_key(&self) -> String {
        match &self.local_files {
            Some(files) => format!("bert-local-{}", files.weights.display()),
            None => format!("bert-{}@{}", self.model_id, self.revision),
        }
    }
}

/// Sentiment classifier built on [`BertForSequenceClassification`].
///
/// Cloning is cheap; clones share the weights.
#[derive(Debug, Clone)]
pub struct BertSentimentModel {
    model: Arc<BertForSequenceClassification>,
    device: Device,
    id2label: HashMap<String, String>,
    num_labels: usize,
    max_len: usize,
}

impl BertSentimentModel {
    pub fn new(options: BertSentimentOptions, device: Device) -> AnyhowResult<Self> {
        let (config_filename, weights_filename) = match &options.local_files {
            Some(files) => (files.config.clone(), files.weights.clone()),
            None => {
                let weights = WeightsLoader::new(&options.model_id, &options.revision);
                (weights.config()?, weights.weights()?)
            }
        };

        let config_content = std::fs::read_to_string(&config_filename)
            .with_context(|| format!("Failed to read config file {config_filename:?}"))?;
        let config: Config = serde_json::from_str(&config_content)
            .map_err(|e| E::msg(format!("Failed to parse model config: {e}")))?;

        let dtype = DType::F32;
        let vb = if weights_filename
            .extension()
            .is_some_and(|ext| ext == "safetensors")
        {
            unsafe { VarBuilder::from_mmaped_safetensors(&[&weights_filename], dtype, &device)? }
        } else if weights_filename
            .extension()
            .is_some_and(|ext| ext == "bin")
        {
            VarBuilder::from_pth(&weights_filename, dtype, &device)?
        } else {
            anyhow::bail!("Unsupported weight file format: {:?}", weights_filename);
        };

        let model = BertForSequenceClassification::load(vb, &config)?;
        tracing::info!(
            model = %options.model_id,
            layers = config.num_hidden_layers,
            labels = config.num_labels(),
            "loaded BERT sentiment model"
        );

        Ok(Self {
            model: Arc::new(model),
            device,
            num_labels: config.num_labels(),
            id2label: config.id2label,
            max_len: config.max_position_embeddings,
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn num_labels(&self) -> usize {
        self.num_labels
    }

    /// Longest input, in tokens, the position embeddings cover.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Human readable name of a label index, e.g. `"4 stars"`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.id2label.get(&index.to_string()).map(String::as_str)
    }

    /// Returns the 0-based index of the most likely label.
    ///
    /// `tokenizer` is expected to truncate to [`max_len`](Self::max_len);
    /// anything longer is cut here as well, keeping the leading tokens.
    pub fn predict(&self, tokenizer: &Tokenizer, text: &str) -> AnyhowResult<usize> {
        let tokens = tokenizer
            .encode(text, true)
            .map_err(|e| E::msg(format!("Tokenization error: {e}")))?;
        let keep = tokens.get_ids().len().min(self.max_len);
        let token_ids = &tokens.get_ids()[..keep];
        let attention_mask_vals = &tokens.get_attention_mask()[..keep];

        let input_ids_tensor = Tensor::new(token_ids, &self.device)?.unsqueeze(0)?;
        let attention_mask_tensor = Tensor::new(attention_mask_vals, &self.device)?.unsqueeze(0)?;

        let output_logits = self
            .model
            .forward(&input_ids_tensor, &attention_mask_tensor)?;

        let prediction = output_logits
            .argmax(D::Minus1)?
            .squeeze(0)?
            .to_scalar::<u32>()? as usize;

        tracing::trace!(
            tokens = keep,
            label = self.label(prediction).unwrap_or("?"),
            "classified"
        );

        Ok(prediction)
    }

    /// Loads the tokenizer matching `options`, truncating to `max_len` tokens.
    pub fn load_tokenizer(options: &BertSentimentOptions, max_len: usize) -> AnyhowResult<Tokenizer> {
        let mut tokenizer = match &options.local_files {
            Some(files) => TokenizerLoader::from_path(&files.tokenizer)?,
            None => TokenizerLoader::new(&options.model_id, &options.revision).load()?,
        };

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: max_len,
                ..Default::default()
            }))
            .map_err(E::msg)?;

        Ok(tokenizer)
    }
}

impl crate::pipelines::sentiment_analysis_pipeline::model::SentimentAnalysisModel
    for BertSentimentModel
{
    type Options = BertSentimentOptions;

    fn new(options: Self::Options, device: Device) -> AnyhowResult<Self> {
        BertSentimentModel::new(options, device)
    }

    fn predict(&self, tokenizer: &Tokenizer, text: &str) -> AnyhowResult<usize> {
        self.predict(tokenizer, text)
    }

    fn get_tokenizer(&self, options: Self::Options) -> AnyhowResult<Tokenizer> {
        Self::load_tokenizer(&options, self.max_len)
    }

    fn num_labels(&self) -> usize {
        self.num_labels
    }

    fn device(&self) -> &Device {
        self.device()
    }
}
