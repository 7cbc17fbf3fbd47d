use clap::Parser;
use std::path::PathBuf;

/// Select constraint labels for constrained caption decoding from detections
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Object class hierarchy JSON (`LabelName` / `Subcategory` nodes)
    #[arg(long, value_name = "FILE")]
    pub hierarchy: PathBuf,

    /// Detections JSON: one batch object or an array of batches, each with
    /// `boxes`, `class_names` and `scores`
    #[arg(long, value_name = "FILE")]
    pub detections: PathBuf,

    /// Filter configuration JSON; flags below override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// NMS IoU threshold (0.0 - 1.0)
    #[arg(long, value_name = "THRESHOLD")]
    pub nms_threshold: Option<f64>,

    /// Maximum number of constraints per batch
    #[arg(long, value_name = "COUNT")]
    pub topk: Option<usize>,

    /// Match class names to hierarchy labels exactly instead of by substring
    #[arg(long)]
    pub exact_match: bool,

    /// Constraint words TSV (`class<TAB>word,word,...`)
    #[arg(long, value_name = "FILE")]
    pub words: Option<PathBuf>,
}
