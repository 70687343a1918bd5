//! Hugging Face hub downloads for the sentiment model.

use anyhow::Context;
use hf_hub::api::sync::Api as HfApi;
use hf_hub::{Repo, RepoType};
use std::path::{Path, PathBuf};
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::bert::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::{Model, Tokenizer};

/// A single file in a model repository at a given revision.
#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub revision: String,
    pub filename: String,
}

impl HfLoader {
    pub fn new(repo: &str, revision: &str, filename: &str) -> Self {
        Self {
            repo: repo.into(),
            revision: revision.into(),
            filename: filename.into(),
        }
    }

    /// Downloads the file (or reuses the local hub cache) and returns its path.
    pub fn load(&self) -> anyhow::Result<PathBuf> {
        let hf_api = HfApi::new()?;
        let hf_repo = hf_api.repo(Repo::with_revision(
            self.repo.clone(),
            RepoType::Model,
            self.revision.clone(),
        ));

        let path = hf_repo
            .get(self.filename.as_str())
            .with_context(|| format!("fetching {} from {}", self.filename, self.repo))?;
        tracing::debug!(repo = %self.repo, file = %self.filename, "resolved hub file");
        Ok(path)
    }
}

/// Config and weights of a sequence classification checkpoint.
#[derive(Debug, Clone)]
pub struct WeightsLoader {
    repo: String,
    revision: String,
}

impl WeightsLoader {
    pub fn new(repo: &str, revision: &str) -> Self {
        Self {
            repo: repo.into(),
            revision: revision.into(),
        }
    }

    pub fn config(&self) -> anyhow::Result<PathBuf> {
        HfLoader::new(&self.repo, &self.revision, "config.json").load()
    }

    /// Prefers `model.safetensors`, falls back to `pytorch_model.bin`.
    pub fn weights(&self) -> anyhow::Result<PathBuf> {
        match HfLoader::new(&self.repo, &self.revision, "model.safetensors").load() {
            Ok(safetensors) => Ok(safetensors),
            Err(safetensors_err) => {
                tracing::debug!(error = %safetensors_err, "no safetensors, trying pytorch_model.bin");
                HfLoader::new(&self.repo, &self.revision, "pytorch_model.bin")
                    .load()
                    .map_err(|e| {
                        anyhow::anyhow!(
                            "Model weights not found in repo. Expected `model.safetensors` or `pytorch_model.bin`. Error: {e}"
                        )
                    })
            }
        }
    }
}

/// Tokenizer for a BERT checkpoint.
///
/// Uses `tokenizer.json` when the repository ships one, otherwise assembles
/// an uncased WordPiece tokenizer from `vocab.txt`.
#[derive(Debug, Clone)]
pub struct TokenizerLoader {
    repo: String,
    revision: String,
}

impl TokenizerLoader {
    pub fn new(repo: &str, revision: &str) -> Self {
        Self {
            repo: repo.into(),
            revision: revision.into(),
        }
    }

    pub fn load(&self) -> anyhow::Result<Tokenizer> {
        match HfLoader::new(&self.repo, &self.revision, "tokenizer.json").load() {
            Ok(path) => Self::from_path(&path),
            Err(_) => {
                let vocab = HfLoader::new(&self.repo, &self.revision, "vocab.txt").load()?;
                wordpiece_from_vocab(&vocab)
            }
        }
    }

    /// Loads a local `tokenizer.json`, or a `vocab.txt` for any other extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Tokenizer> {
        if path.extension().is_some_and(|ext| ext == "json") {
            Tokenizer::from_file(path).map_err(anyhow::Error::msg)
        } else {
            wordpiece_from_vocab(path)
        }
    }
}

/// The same pipeline `BertTokenizer(do_lower_case=True)` applies.
fn wordpiece_from_vocab(vocab: &Path) -> anyhow::Result<Tokenizer> {
    let vocab_path = vocab
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("vocabulary path {vocab:?} is not valid UTF-8"))?;
    let wordpiece = WordPiece::from_file(vocab_path)
        .unk_token("[UNK]".to_string())
        .build()
        .map_err(anyhow::Error::msg)?;

    let special = |token: &str| {
        wordpiece
            .token_to_id(token)
            .ok_or_else(|| anyhow::anyhow!("vocabulary has no {token} token"))
    };
    let cls = special("[CLS]")?;
    let sep = special("[SEP]")?;

    let mut tokenizer = Tokenizer::new(wordpiece);
    tokenizer
        .with_normalizer(Some(BertNormalizer::new(true, true, None, true)))
        .with_pre_tokenizer(Some(BertPreTokenizer))
        .with_post_processor(Some(BertProcessing::new(
            ("[SEP]".to_string(), sep),
            ("[CLS]".to_string(), cls),
        )));

    Ok(tokenizer)
}
