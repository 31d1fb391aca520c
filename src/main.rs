//! Text Risk - preprocessing pipeline CLI
//!
//! Runs the normalization and feature-engineering stages over labelled
//! message datasets and writes the resulting artifacts.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use text_risk::data::{DataLoader, LabelEncoder};
use text_risk::embedding::HashingEmbedder;
use text_risk::nlp::{Annotator, EmoticonLexicon, RuleAnnotator, TextNormalizer};
use text_risk::pipeline::RiskPipeline;
use text_risk::spell::SpellCorrector;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "text_risk")]
#[command(about = "Text normalization and feature engineering for risk classification")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a single message and print the diagnostics
    Normalize {
        /// The message text
        #[arg(short, long)]
        text: String,
    },

    /// Extract the feature table from a labelled message CSV
    Extract {
        /// Path to a CSV with text,class columns
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV path for the feature table
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Fit the full pipeline and write the final training matrix
    Pipeline {
        /// Path to a CSV with text,class columns
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV path for the numeric matrix
        #[arg(short, long)]
        output: PathBuf,

        /// Consensus features to keep
        #[arg(short = 'k', long, default_value = "15")]
        top_k: usize,

        /// Optional JSON path for the selected feature names
        #[arg(short, long)]
        selected: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize { text } => {
            let lexicon = EmoticonLexicon::standard();
            let annotator = RuleAnnotator::new(lexicon.clone());
            let normalizer = TextNormalizer::new(SpellCorrector::new(), lexicon);

            let doc = annotator.annotate(&text);
            let result = normalizer.normalize(&doc);

            println!("normalized:  {}", result.text);
            println!("censored:    {}", result.censored);
            println!("compression: {}", result.compression);
        }

        Commands::Extract { input, output } => {
            let messages = DataLoader::load_messages(&input)?;
            info!("loaded {} messages", messages.len());

            let texts: Vec<String> = messages.iter().map(|m| m.text.clone()).collect();
            let pipeline = RiskPipeline::new(HashingEmbedder::default(), 15);
            let table = pipeline.extract_features(&texts);

            DataLoader::save_table(&table, &output)?;
            info!("wrote {} rows x {} columns to {:?}", table.n_rows(), table.n_columns(), output);
        }

        Commands::Pipeline {
            input,
            output,
            top_k,
            selected,
        } => {
            let messages = DataLoader::load_messages(&input)?;
            info!("loaded {} messages", messages.len());

            let texts: Vec<String> = messages.iter().map(|m| m.text.clone()).collect();
            let classes: Vec<String> = messages.iter().map(|m| m.class.clone()).collect();

            let mut encoder = LabelEncoder::new();
            let labels = encoder.fit_transform(&classes)?;
            info!("classes: {:?}", encoder.classes());

            let mut pipeline = RiskPipeline::new(HashingEmbedder::default(), top_k);
            let matrix = pipeline.fit_transform(&texts, &labels)?;

            DataLoader::save_matrix(matrix.view(), &output)?;
            info!("wrote {} x {} matrix to {:?}", matrix.nrows(), matrix.ncols(), output);

            if let Some(path) = selected {
                let features = pipeline.selected_features()?;
                DataLoader::save_selected_features(features, &path)?;
                info!("selected features: {:?}", features);
            }
        }
    }

    Ok(())
}
