use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One row of the movie dataset. `combined_text` is derived by
/// [`build_corpus`] before vectorization; raw input leaves it empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub genre: String,
    pub description: String,
    pub year: i32,
    /// IMDB rating in [0.0, 10.0]; ingestion defaults missing values to 0.0.
    pub rating: f64,
    #[serde(default)]
    pub combined_text: String,
}

/// Combine genre and description into the single text field fed to the
/// vectorizer, repeating the genre `genre_weight` times so that genre
/// overlap outweighs incidental word overlap in the synopsis. A weight of 0
/// drops the genre entirely and yields the description alone.
///
/// Ingestion is expected to have filtered empty fields already; an empty
/// genre or description here is an input error.
pub fn combined_text(genre: &str, description: &str, genre_weight: u32) -> Result<String> {
    if genre.is_empty() || description.is_empty() {
        return Err(Error::Input(
            "record has an empty genre or description".into(),
        ));
    }
    let mut text =
        String::with_capacity((genre.len() + 1) * genre_weight as usize + description.len());
    for _ in 0..genre_weight {
        text.push_str(genre);
        text.push(' ');
    }
    text.push_str(description);
    Ok(text)
}

/// Populate `combined_text` on every record, in place. Pure apart from that
/// field; record order is untouched.
pub fn build_corpus(records: &mut [MovieRecord], genre_weight: u32) -> Result<()> {
    for rec in records.iter_mut() {
        rec.combined_text = combined_text(&rec.genre, &rec.description, genre_weight)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_two_repeats_genre_twice() {
        let text = combined_text("Action,Adventure", "a daring heist", 2).unwrap();
        assert_eq!(text, "Action,Adventure Action,Adventure a daring heist");
    }
}
