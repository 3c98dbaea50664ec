use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vqa_hub::config::Config;
use vqa_hub::models::{Catalog, Image, ModelRegistry};
use vqa_hub::timing::measure_duration;

#[derive(Parser)]
#[command(name = "vqa-hub")]
#[command(about = "Registry of visual question answering models", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.config/vqa-hub/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered models
    List,
    /// Ask a model a question about one or more images
    Ask {
        /// Registered model name
        #[arg(short, long)]
        model: String,
        /// Question to ask
        #[arg(short, long)]
        question: String,
        /// Image files, in order
        #[arg(short, long = "image")]
        images: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load()?,
    };
    let registry = ModelRegistry::from_config(&config, Catalog::builtin())?;

    match cli.command {
        Commands::List => list(&registry),
        Commands::Ask {
            model,
            question,
            images,
        } => ask(&registry, &config, &model, &question, &images)?,
    }

    Ok(())
}

fn list(registry: &ModelRegistry) {
    for name in registry.names() {
        if let Some(class) = registry.class_of(name) {
            println!("{name}\t{}\t{}", class.load_path(), class.framework());
        }
    }
}

fn ask(
    registry: &ModelRegistry,
    config: &Config,
    name: &str,
    question: &str,
    image_paths: &[PathBuf],
) -> anyhow::Result<()> {
    let params = config.init_params(name)?;
    let model = registry.get(name, Some(&params))?;
    tracing::info!(
        "Using model '{}' ({})",
        model.model_name(),
        model.framework()
    );

    let images = image_paths
        .iter()
        .map(|path| {
            std::fs::read(path)
                .map(Image::from_bytes)
                .with_context(|| format!("Failed to read image {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut answer = String::new();
    let secs = measure_duration(|| {
        answer = match images.as_slice() {
            [image] => model.predict_on_image(image, question)?,
            images => model.predict_on_images(images, question)?,
        };
        Ok::<_, vqa_hub::VqaError>(())
    })?;

    println!("{answer}");
    eprintln!("Answered in {secs:.4}s");
    Ok(())
}
