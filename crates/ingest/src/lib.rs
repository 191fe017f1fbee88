pub mod discovery;
pub mod error;
pub mod reader;
pub mod writer;

pub use discovery::{Discovery, DocumentParts, PartType, discover_documents, parse_file_name};
pub use error::IngestError;
pub use reader::{FrameReader, RawDocument};
pub use writer::{output_path, write_output};
