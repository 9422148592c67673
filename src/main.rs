use anyhow::Result;
use clap::Parser;
use log::info;
use nirupana::{BuiltinModel, ModelManager, Prediction, SentimentClassifier};
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Force a fresh download of the model files
    #[arg(short, long)]
    fresh: bool,

    /// Classify a single review instead of the built-in samples
    #[arg(short, long)]
    text: Option<String>,

    /// Bearer token for fetching a gated model repository
    #[arg(long)]
    hf_token: Option<String>,
}

async fn ensure_model_downloaded(fresh: bool, hf_token: Option<String>) -> Result<()> {
    let mut manager = ModelManager::new_default()?;
    if let Some(token) = hf_token {
        manager = manager.with_auth_token(token);
    }
    let info = BuiltinModel::IndicBertMalayalam.get_model_info();

    if fresh {
        info!("Fresh download requested - removing any existing model files...");
        manager.remove_download(&info.name)?;
    }

    manager.ensure_model_downloaded(&info).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Malayalam Review Sentiment Demo ===");

    // Model load failure here is fatal; there is no per-request fallback.
    ensure_model_downloaded(args.fresh, args.hf_token).await?;

    let start_time = Instant::now();
    info!("Building classifier...");

    let classifier = SentimentClassifier::builder()
        .with_model(BuiltinModel::IndicBertMalayalam)?
        .build()?;

    info!(
        "=== Classifier ready (took {:.2?}) ===",
        start_time.elapsed()
    );

    if let Some(text) = args.text {
        process_input(&classifier, &text)?;
        return Ok(());
    }

    let sample_reviews = vec![
        // Clearly positive Malayalam review
        "ഈ സിനിമ വളരെ മനോഹരമായിരുന്നു, അഭിനയം ഗംഭീരം",
        // Clearly negative Malayalam review
        "ഈ സിനിമ തീരെ മോശമായിരുന്നു, സമയം പാഴായി",
        // Short positive
        "നല്ല ചിത്രം",
        // Not Malayalam: rejected by the script gate
        "This movie was great",
        // Mixed script, mostly Malayalam
        "കഥ super ആയിരുന്നു, പക്ഷേ climax കുറച്ചു മോശം",
        // Whitespace only: rejected before inference
        "   ",
    ];

    info!("=== Running Classifications ({} inputs) ===", sample_reviews.len());
    let classify_start = Instant::now();

    for (i, text) in sample_reviews.iter().enumerate() {
        info!("Sample {}/{}:", i + 1, sample_reviews.len());
        process_input(&classifier, text)?;
    }

    info!("=== Demo Complete ===");
    info!("Total time: {:.2?}", start_time.elapsed());
    info!(
        "Average time per classification: {:.2?}",
        classify_start.elapsed() / sample_reviews.len() as u32
    );

    Ok(())
}

fn process_input(classifier: &SentimentClassifier, text: &str) -> Result<()> {
    info!("Processing: {}", text);

    let (prediction, scores) = classifier.predict_with_scores(text)?;
    println!("\nReview: {}", text);
    match prediction {
        Prediction::Label(label) => {
            println!("  Sentiment: {}", label);
            for (label, score) in classifier.label_map().labels().zip(scores.iter()) {
                println!("    {}: {:.1}%", label, score * 100.0);
            }
        }
        Prediction::NotMalayalam => {
            println!("  Rejected: please write the review in Malayalam");
        }
        Prediction::UnknownLabel => {
            println!("  Unmapped prediction index; check the configured label map");
        }
    }

    Ok(())
}
