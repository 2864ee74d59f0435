/// Data layer: file handles, CSV parsing, and the types they produce.
///
/// Architecture:
/// ```text
///   dialog / drop / argv
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  FileSource → FileRef
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parser   │  CsvParser: FileRef + ParseConfig → ParseOutput
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  ParsedRecord (header → value), ImportPreview
///   └──────────┘
/// ```

pub mod error;
pub mod model;
pub mod parser;
pub mod source;
