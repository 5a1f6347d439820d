pub mod fasta_loader;

pub use fasta_loader::{load_fasta_records, parse_fasta};
