//! Tokens (gem instances) and the palette of types they are drawn from.

use tracing::warn;

use crate::error::ConfigError;
use crate::motion::Motion;
use crate::rng::RandomSource;
use crate::types::{TokenId, TokenType, TokenTypeId};

/// A gem on the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    id: TokenId,
    kind: TokenType,
    pub motion: Motion,
}

impl Token {
    pub fn new(id: TokenId, kind: TokenType, motion: Motion) -> Self {
        Self { id, kind, motion }
    }

    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn kind(&self) -> &TokenType {
        &self.kind
    }

    pub fn kind_id(&self) -> TokenTypeId {
        self.kind.id
    }

    /// Change the token's type.
    ///
    /// `None` keeps the current type (and its appearance) and logs a warning.
    /// Returns whether the type changed.
    pub fn set_kind(&mut self, kind: Option<TokenType>) -> bool {
        match kind {
            Some(kind) => {
                self.kind = kind;
                true
            }
            None => {
                warn!(token = self.id.0, "null token type assignment; keeping current type");
                false
            }
        }
    }

    pub fn is_moving(&self) -> bool {
        !self.motion.is_settled()
    }
}

/// The fixed, non-empty set of token types for a session.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPalette {
    types: Vec<TokenType>,
}

impl TokenPalette {
    /// Validate and wrap a list of types. Ids must be unique.
    pub fn new(types: Vec<TokenType>) -> Result<Self, ConfigError> {
        if types.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        for (i, t) in types.iter().enumerate() {
            if types[..i].iter().any(|other| other.id == t.id) {
                return Err(ConfigError::DuplicateTypeId(t.id));
            }
        }
        Ok(Self { types })
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> &[TokenType] {
        &self.types
    }

    pub fn get(&self, id: TokenTypeId) -> Option<TokenType> {
        self.types.iter().copied().find(|t| t.id == id)
    }

    pub fn by_glyph(&self, glyph: char) -> Option<TokenType> {
        self.types.iter().copied().find(|t| t.display.glyph == glyph)
    }

    /// Draw a type uniformly at random.
    pub fn pick(&self, rng: &mut impl RandomSource) -> TokenType {
        let i = rng.next_index(self.types.len());
        self.types[i.min(self.types.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use crate::types::{default_gem_types, Rgb, Vec2};

    #[test]
    fn empty_palette_is_rejected() {
        assert!(matches!(
            TokenPalette::new(Vec::new()),
            Err(ConfigError::EmptyPalette)
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let a = TokenType::new(1, 10, 'a', Rgb::default());
        let b = TokenType::new(1, 20, 'b', Rgb::default());
        assert!(matches!(
            TokenPalette::new(vec![a, b]),
            Err(ConfigError::DuplicateTypeId(TokenTypeId(1)))
        ));
    }

    #[test]
    fn pick_follows_the_random_source() {
        let palette = TokenPalette::new(default_gem_types()).unwrap();
        let mut seq = SequenceSource::new(vec![2, 5]);
        assert_eq!(palette.pick(&mut seq).display.glyph, 'Y');
        assert_eq!(palette.pick(&mut seq).display.glyph, 'P');
    }

    #[test]
    fn null_type_keeps_previous_kind() {
        let palette = TokenPalette::new(default_gem_types()).unwrap();
        let red = palette.by_glyph('R').unwrap();
        let mut token = Token::new(TokenId(7), red, Motion::at(Vec2::ZERO));

        assert!(!token.set_kind(None));
        assert_eq!(token.kind(), &red);

        let blue = palette.by_glyph('B').unwrap();
        assert!(token.set_kind(Some(blue)));
        assert_eq!(token.kind_id(), blue.id);
    }
}
