pub mod error;
pub mod index;
pub mod query;
pub mod report;
pub mod tokenizer;
pub mod urls;

pub use error::{Error, Result};
pub use index::{BuildReport, DocId, DocMeta, InvertedIndex, Posting, TermId};
pub use query::{Disposition, SearchHit, SearchOutcome};
pub use report::{run_batch, Transcript};
pub use urls::UrlMap;
