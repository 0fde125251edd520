pub mod blocks;
pub mod inline;
pub mod macros;
pub mod span;

#[cfg(test)]
mod tests;

use crate::document::Document;
use crate::error::ParseError;

use blocks::{BlockBuilder, LineClassifier};

/// Runs the line parser over `text`, appending to `doc`. Hooks are not run
/// here; see [`Document::parse`].
pub(crate) fn parse_into(doc: &mut Document, text: &str) -> Result<(), ParseError> {
    let classifier = LineClassifier;
    let mut builder = BlockBuilder::new(doc);

    for (i, line) in text.lines().enumerate() {
        let lc = classifier.classify(i + 1, line);
        builder.push(&lc)?;
    }

    builder.finish()
}
