//! Command implementations for the rankfuse CLI.

use tokio::runtime::Builder as TokioRuntimeBuilder;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::fusion::config::FusionConfig;
use crate::retriever::hybrid::HybridSearch;
use crate::retriever::provider::StaticResultProvider;

/// Execute a CLI command.
pub fn execute_command(args: RankFuseArgs) -> Result<()> {
    match &args.command {
        Command::Fuse(fuse_args) => fuse(fuse_args, &args),
        Command::Explain(fuse_args) => explain(fuse_args, &args),
    }
}

/// Merge the configuration file (if any) with command line overrides.
pub fn resolve_config(args: &FuseArgs) -> Result<FusionConfig> {
    let mut config = match &args.config {
        Some(path) => FusionConfig::from_json_file(path)?,
        None => FusionConfig::default(),
    };

    if args.max_results.is_some() || args.fusion_constant.is_some() {
        let max_results = args
            .max_results
            .unwrap_or_else(|| config.max_results as i64);
        let fusion_constant = args.fusion_constant.unwrap_or(config.fusion_constant);
        config = FusionConfig::from_signed(max_results, fusion_constant)?
            .with_tie_break(config.tie_break);
    }
    if let Some(tie_break) = args.tie_break {
        config = config.with_tie_break(tie_break.into());
    }

    config.validate()?;
    Ok(config)
}

/// Build a hybrid search with one static provider per result file.
pub fn build_search(args: &FuseArgs) -> Result<HybridSearch> {
    let config = resolve_config(args)?;
    log::info!(
        "fusing {} result files (k = {}, max_results = {}, tie_break = {:?})",
        args.result_files.len(),
        config.fusion_constant,
        config.max_results,
        config.tie_break
    );

    let mut search = HybridSearch::new(config)?;
    let mut longest = 0;
    for path in &args.result_files {
        let provider = StaticResultProvider::from_json_file(path)?;
        longest = longest.max(provider.results().len());
        search.add_provider(Box::new(provider));
    }

    Ok(search.with_provider_top_k(args.per_file_limit.unwrap_or(longest)))
}

/// Fuse the given result files and print the ranking.
fn fuse(args: &FuseArgs, cli_args: &RankFuseArgs) -> Result<()> {
    let search = build_search(args)?;
    let runtime = TokioRuntimeBuilder::new_current_thread()
        .enable_all()
        .build()?;
    let fused = runtime.block_on(search.search(""))?;
    output_fused(fused, cli_args)
}

/// Fuse the given result files and print every score's terms.
fn explain(args: &FuseArgs, cli_args: &RankFuseArgs) -> Result<()> {
    let search = build_search(args)?;
    let runtime = TokioRuntimeBuilder::new_current_thread()
        .enable_all()
        .build()?;
    let explained = runtime.block_on(search.explain(""))?;
    output_explained(&explained, cli_args)
}
