//! Per-fragment text analysis: normalization, script detection, numbering
//! markers and the multilingual lexicon.

mod lexicon;
mod normalize;
mod numbering;
mod script;

pub use lexicon::{is_page_number, is_short_number, Lexicon, LexiconConfig};
pub use normalize::{char_len, is_all_caps, is_title_case, normalize, strip_format_chars};
pub use numbering::{extract_numbering, Numbering, NumberingStyle};
pub use script::{detect_script, Script, ScriptRange, ScriptTable};
