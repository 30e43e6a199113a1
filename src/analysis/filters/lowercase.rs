use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Lowercases every token. Must run ahead of the stopword and stemmer
/// filters, which assume lowercase input.
pub struct LowercaseFilter;

impl TokenFilter for LowercaseFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|mut token| {
                let lowered = token.text.to_lowercase();
                token.set_text(lowered);
                token
            })
            .collect()
    }

    fn name(&self) -> &str {
        "lowercase"
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(LowercaseFilter)
    }
}
