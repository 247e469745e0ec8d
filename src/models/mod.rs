mod classification;

pub use classification::{CheckNewsRequest, ClassificationResult, ModelVerdict, NewsStatus};
