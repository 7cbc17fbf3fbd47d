mod args;
mod parser;

use anyhow::{Context, Result};
use cbs_core::{CategoryHierarchy, ConstraintWords, LabelMatch, TaxonomyNode};
use cbs_filter::{ConstraintFilter, FilterConfig, FilterTables};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use parser::ConstraintReport;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = args::Args::parse();

    let mut config = match &args.config {
        Some(path) => FilterConfig::from_json_file(path)?,
        None => FilterConfig::default(),
    };
    if let Some(nms_threshold) = args.nms_threshold {
        config.nms_threshold = nms_threshold;
    }
    if let Some(topk) = args.topk {
        config.topk = topk;
    }
    if args.exact_match {
        config.label_match = LabelMatch::Exact;
    }
    info!(?config, "filter configuration");

    let tables = FilterTables::default();
    let taxonomy = TaxonomyNode::from_json_file(&args.hierarchy)?;
    let hierarchy =
        CategoryHierarchy::build_with_match(&taxonomy, &tables.blacklist, config.label_match)
            .with_context(|| format!("Failed to build hierarchy from {:?}", args.hierarchy))?;
    info!(categories = hierarchy.len(), "loaded category hierarchy");

    let filter = ConstraintFilter::with_tables(Arc::new(hierarchy), config, tables)?;

    let words = args
        .words
        .as_ref()
        .map(ConstraintWords::from_file)
        .transpose()?;

    let batches = parser::load_batches(&args.detections)?;
    info!(batches = batches.len(), "loaded detections");

    for (index, result) in filter.filter_many(&batches).into_iter().enumerate() {
        let constraints =
            result.with_context(|| format!("Failed to select constraints for batch {}", index))?;
        let report = ConstraintReport::new(constraints, words.as_ref());

        println!(
            "{}",
            serde_json::to_string(&report).context("Failed to serialize constraints")?
        );
    }

    Ok(())
}
