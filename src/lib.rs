//! Inline language-variant conversion for Wikitext-style `-{ ... }-` markup.
//!
//! This crate implements the conversion pipeline MediaWiki calls its
//! `LanguageConverter`: a longest-match [`trie::Trie`] as the rule table, a
//! [`markup`] parser for the inline directive syntax that can install,
//! remove, or inline a rule mid-document, and a [`converter::LanguageConverter`]
//! that fuses the two into a single-pass rewrite of a whole document to a
//! target language variant.
//!
//! The three pieces are tightly coupled on purpose: directives mutate the
//! same document-local trie that drives the text scan, and the scan has to
//! interleave directive handling with longest-prefix matching rather than
//! running them as separate passes.

pub mod converter;
pub mod language;
pub mod markup;
pub mod trie;

pub use converter::{ConvertOptions, LanguageConverter};
pub use language::{Language, LoadError};
pub use markup::{Directive, Flag, ParseError, RuleBody};
pub use trie::Trie;
