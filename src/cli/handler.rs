// Wed Jan 15 2026 - Alex

use super::args::{Args, Command, LayoutArgs, OptimizeArgs, ReviewArgs};
use crate::config::Config;
use crate::diff::ChangedStruct;
use crate::extract::{extractor_for, GoExtractor, ManifestExtractor};
use crate::output::{GoRenderer, LayoutFormatter, OffsetFormat};
use crate::review::{Advisor, Analyzer, FileChange};
use crate::structure::{FieldOptimizer, SerializableLayout, StructLayout};
use crate::utils::logging::LoggingUtils;
use crate::utils::pluralize;
use anyhow::Context;
use colored::Colorize;
use std::fs;
use std::path::Path;

pub struct CommandHandler {
    json: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { json: false }
    }

    pub fn execute(&mut self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args);
        if args.no_color {
            colored::control::set_override(false);
        }
        self.json = args.json;

        let config = self.load_config(&args)?;

        match args.command {
            Command::Layout(layout_args) => self.handle_layout(&config, layout_args),
            Command::Optimize(optimize_args) => self.handle_optimize(&config, optimize_args),
            Command::Review(review_args) => self.handle_review(&config, review_args),
        }
    }

    fn setup_logging(&self, args: &Args) {
        LoggingUtils::init_logger(LoggingUtils::level_from_str(&args.log_level));
    }

    fn load_config(&self, args: &Args) -> anyhow::Result<Config> {
        let mut config = match &args.config {
            Some(path) => Config::load(path).with_context(|| format!("loading config {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(word_size) = args.word_size {
            config = config.with_word_size(word_size);
        }

        config.validate()?;
        Ok(config)
    }

    fn extract(&self, config: &Config, path: &Path) -> anyhow::Result<Vec<StructLayout>> {
        let source = fs::read(path).with_context(|| format!("reading {}", path.display()))?;

        let go = GoExtractor::new(config.word_size, config.calculator());
        let manifest = ManifestExtractor::new(config.calculator());
        let structs = extractor_for(path, &go, &manifest).extract(path, &source)?;
        Ok(structs)
    }

    fn handle_layout(&self, config: &Config, args: LayoutArgs) -> anyhow::Result<()> {
        let structs = self.extract(config, &args.file)?;

        if self.json {
            let layouts: Vec<SerializableLayout> = structs.iter().map(SerializableLayout::from).collect();
            println!("{}", serde_json::to_string_pretty(&layouts)?);
            return Ok(());
        }

        let format = if args.hex { OffsetFormat::Hex } else { OffsetFormat::Decimal };
        let formatter = LayoutFormatter::new().with_offset_format(format).with_padding(!args.no_padding);

        println!("{}", formatter.format_structure_list(&structs));

        let padding: u64 = structs.iter().map(StructLayout::padding).sum();
        println!(
            "{} {}, {} of padding",
            "[+]".green(),
            pluralize(structs.len(), "struct", "structs"),
            pluralize(padding as usize, "byte", "bytes")
        );
        Ok(())
    }

    fn handle_optimize(&self, config: &Config, args: OptimizeArgs) -> anyhow::Result<()> {
        let structs = self.extract(config, &args.file)?;

        let advisor = Advisor::new(FieldOptimizer::new(config.calculator()), Box::new(GoRenderer::new()));
        let changed: Vec<ChangedStruct> = structs.into_iter().map(|s| ChangedStruct::new(s, None)).collect();
        let suggestions = advisor.advise_all(&changed);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
            return Ok(());
        }

        if suggestions.is_empty() {
            println!("{} No struct can lose padding by reordering", "[+]".green());
            return Ok(());
        }

        for suggestion in &suggestions {
            println!(
                "{} {} (line {}): padding {} -> {}",
                "[*]".blue(),
                suggestion.struct_name.bold(),
                suggestion.line,
                suggestion.current_padding,
                suggestion.optimized_padding
            );
            println!("{}\n", suggestion.after);
        }

        let saved: u64 = suggestions.iter().map(|s| s.saved_bytes()).sum();
        println!("{} {} saved", "[+]".green(), pluralize(saved as usize, "byte", "bytes"));
        Ok(())
    }

    fn handle_review(&self, config: &Config, args: ReviewArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let base = match &args.base {
            Some(path) => Some(fs::read(path).with_context(|| format!("reading {}", path.display()))?),
            None => None,
        };
        let head = fs::read(&args.head).with_context(|| format!("reading {}", args.head.display()))?;

        let change = FileChange::new(args.reported_path(), base, Some(head));
        let comments = Analyzer::new(config).review(std::slice::from_ref(&change));

        if self.json {
            println!("{}", serde_json::to_string_pretty(&comments)?);
            return Ok(());
        }

        if comments.is_empty() {
            println!("{} No padding issues in changed structs", "[+]".green());
            return Ok(());
        }

        for comment in &comments {
            println!("{} {}:{}", "[!]".yellow(), comment.file.display(), comment.line);
            println!("{}\n", comment.text);
        }
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
