mod token;
#[allow(clippy::module_inception)]
mod tokenizer;

pub use token::CSSToken;
pub use tokenizer::CSSTokenizer;
