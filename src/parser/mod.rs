//! Parsing of generated text bodies into document blocks.

mod accumulator;
mod body;
mod line;
mod normalize;
mod options;

pub use accumulator::TableAccumulator;
pub use body::{parse_with_options, BodyParser, ParseStats};
pub use line::{classify, is_separator, split_cells, LineKind};
pub use normalize::normalize;
pub(crate) use normalize::is_xml_illegal;
pub use options::{ErrorMode, ParseOptions};
