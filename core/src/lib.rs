pub mod bm25;
pub mod builder;
pub mod config;
pub mod error;
pub mod extract;
mod index;
pub mod merge;
pub mod persist;
pub mod stats;
pub mod tokenizer;

pub use bm25::{render_results, ScoredDoc};
pub use builder::{CollectionBuilder, DocumentCounts};
pub use config::{Bm25Params, BuildConfig, Config};
pub use error::CollectionError;
pub use extract::{PdfExtractor, PlainTextExtractor, TextExtractor};
pub use index::{Collection, DocName, Posting, PostingList, Term, TermId, Vocabulary};
