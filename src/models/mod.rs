pub mod loaders;
pub mod record;

pub use loaders::{load_fasta_records, parse_fasta};
pub use record::{ErrorRecord, ItemIndex, PredictionResult, SequenceRecord};
