pub mod bert;

pub use bert::{BertForSequenceClassification, BertSentimentModel, BertSentimentOptions};
