use anyhow::{Context, Result};
use clap::Parser;
use core::{build_corpus, recommend, MovieRecord, TermWeightSpace};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

/// Raw dataset row; columns beyond these five are ignored.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Description")]
    description: Option<String>,
    #[serde(rename = "Year")]
    year: Option<i32>,
    #[serde(rename = "Rating")]
    rating: Option<f64>,
}

#[derive(Parser)]
#[command(name = "recommender")]
#[command(about = "TF-IDF + cosine similarity movie recommender", long_about = None)]
struct Cli {
    /// User query describing desired movie attributes
    #[arg(long, default_value = "I love thrilling superhero action movies")]
    query: String,
    /// Path to the IMDB dataset CSV
    #[arg(long, default_value = "IMDB-Movie-Data.csv")]
    csv_file: String,
    /// Number of recommendations to return
    #[arg(long, default_value_t = 5)]
    top_n: i64,
    /// Weight for text similarity (0 < alpha <= 1)
    #[arg(long, default_value_t = 0.8)]
    alpha: f64,
    /// Times to repeat the genre text for emphasis
    #[arg(long, default_value_t = 2)]
    genre_weight: u32,
    /// Maximum number of dataset rows to read
    #[arg(long, default_value_t = 500)]
    limit: usize,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let mut corpus = load_dataset(Path::new(&cli.csv_file), cli.limit)
        .with_context(|| format!("loading dataset from {}", cli.csv_file))?;
    build_corpus(&mut corpus, cli.genre_weight)?;

    let space = TermWeightSpace::fit(&corpus)?;
    let results = recommend(&space, &corpus, &cli.query, cli.top_n, cli.alpha)?;

    println!();
    println!("User Query: {}", cli.query);
    println!("Top {} Recommendations (alpha={}):", cli.top_n, cli.alpha);
    println!();
    for (i, rec) in results.iter().enumerate() {
        println!(
            "{}) {} ({}), Genre: {}, IMDB Rating: {}, Score: {}",
            i + 1,
            rec.title,
            rec.year,
            rec.genre,
            rec.rating,
            rec.score
        );
    }
    Ok(())
}

/// Read up to `limit` rows, dropping any with a missing or empty Title,
/// Genre, or Description. A missing Rating defaults to 0.0 so low-quality
/// metadata still participates in re-ranking, and a missing Year defaults
/// to 0 in the rendered output. File order is preserved.
fn load_dataset(path: &Path, limit: usize) -> Result<Vec<MovieRecord>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in reader.deserialize::<CsvRow>().take(limit) {
        match to_record(row?) {
            Some(rec) => records.push(rec),
            None => skipped += 1,
        }
    }
    tracing::info!(loaded = records.len(), skipped, "ingested dataset");
    Ok(records)
}

fn to_record(row: CsvRow) -> Option<MovieRecord> {
    let title = row.title.filter(|s| !s.trim().is_empty())?;
    let genre = row.genre.filter(|s| !s.trim().is_empty())?;
    let description = row.description.filter(|s| !s.trim().is_empty())?;
    Some(MovieRecord {
        title,
        genre,
        description,
        year: row.year.unwrap_or(0),
        rating: row.rating.unwrap_or(0.0),
        combined_text: String::new(),
    })
}
