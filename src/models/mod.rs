pub mod implementations;

pub use implementations::{BertSentimentModel, BertSentimentOptions};
