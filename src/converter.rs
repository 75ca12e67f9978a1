//! The conversion pipeline: segmentation, the two-mode global pass, and the
//! longest-prefix emit phase that rewrites a whole document to a target
//! language variant.

use crate::language::Language;
use crate::markup::{Directive, Flag, RuleBody};
use crate::trie::Trie;
use regex::Regex;
use std::sync::LazyLock;

/// Bounded lookahead, in Unicode scalars, used for every longest-prefix
/// lookup while scanning literal text. Caps worst-case per-position work;
/// keys longer than this can never match.
const WINDOW_LEN: usize = 29;

/// Matches a single `-{ ... }- ` directive, non-greedy so the first `}-`
/// terminates it. Nested directives are not supported.
static DIRECTIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\{.*?\}-").expect("static pattern is valid"));

/// Options accepted by [`LanguageConverter::convert`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertOptions {
    /// If true, global (`HIDDEN`/`COPY`/`REMOVE`) directives take effect at
    /// the position they appear in the document, rather than being
    /// pre-scanned and applied before any text is emitted.
    pub sequential_global: bool,
    /// Acknowledged but unimplemented upstream: would skip
    /// rewriting inside `<pre>`, `<code>`, and `<script>` spans. Currently
    /// a documented no-op.
    pub avoid_html_code: bool,
}

/// One unit of a segmented document: either a literal span of text or a
/// parsed directive, in source order.
enum Segment<'a> {
    Text(&'a str),
    Directive(Directive),
}

/// Converts whole documents to a target [`Language`] variant.
///
/// Owns nothing but a reference to the language; the working trie `W` used
/// to hold document-local rules is local to each [`LanguageConverter::convert`]
/// call, so one converter can process many documents, and even be shared
/// across threads, without synchronization.
pub struct LanguageConverter<'lang> {
    language: &'lang Language,
}

impl<'lang> LanguageConverter<'lang> {
    /// Builds a converter targeting the given language.
    pub fn from_language(language: &'lang Language) -> Self {
        Self { language }
    }

    /// Converts `text` to this converter's target language.
    pub fn convert(&self, text: &str, options: ConvertOptions) -> String {
        if options.avoid_html_code {
            log::trace!("avoid_html_code requested but not implemented; ignoring");
        }

        let mut working = Trie::new();
        let mut segments = self.segment(text);

        if !options.sequential_global {
            segments.retain_mut(|segment| {
                let Segment::Directive(directive) = segment else {
                    return true;
                };
                if let RuleBody::Unidirectional { .. } | RuleBody::Omnidirectional { .. } =
                    &directive.rule
                {
                    if directive.flags.contains(&Flag::Hidden) || directive.flags.contains(&Flag::Copy) {
                        self.install_rule(directive, &mut working);
                    }
                    if directive.flags.contains(&Flag::Remove) {
                        self.remove_rule(directive, &mut working);
                    }
                }
                !(directive.flags.contains(&Flag::Hidden) || directive.flags.contains(&Flag::Remove))
            });
        }

        let mut output = String::new();
        for segment in &segments {
            match segment {
                Segment::Text(span) => self.emit_literal(span, &working, &mut output),
                Segment::Directive(directive) => {
                    self.emit_directive(directive, options, &mut working, &mut output);
                }
            }
        }
        output
    }

    /// Splits `text` into alternating literal spans and parsed directives.
    /// Directives that fail to parse (the strict policy in `markup::Directive::parse`) are
    /// retained as literal text instead of aborting the whole conversion,
    /// since a single malformed directive should not make the rest of the
    /// document unconvertible.
    fn segment<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut cursor = 0;
        for m in DIRECTIVE_PATTERN.find_iter(text) {
            if m.start() > cursor {
                segments.push(Segment::Text(&text[cursor..m.start()]));
            }
            match Directive::parse(m.as_str()) {
                Ok(directive) => segments.push(Segment::Directive(directive)),
                Err(err) => {
                    log::warn!("malformed directive {:?}: {err}; treating as literal text", m.as_str());
                    segments.push(Segment::Text(m.as_str()));
                }
            }
            cursor = m.end();
        }
        if cursor < text.len() {
            segments.push(Segment::Text(&text[cursor..]));
        }
        segments
    }

    /// Looks up the longest matching prefix of `text`, consulting `extra`
    /// tries first and the language's baseline trie last. Returns the
    /// first non-empty hit's `(value, key length in scalars)`, not the
    /// globally longest match across tries — this first-hit-wins order is
    /// load-bearing: it lets a document-local rule in `extra` shadow a
    /// longer baseline key.
    fn longest_prefix(&self, text: &str, extra: &Trie) -> Option<(String, usize)> {
        if let Some(m) = extra.longest_prefix(text) {
            return Some((m.value().to_string(), m.key_len()));
        }
        let m = self.language.rules().longest_prefix(text)?;
        Some((m.value().to_string(), m.key_len()))
    }

    /// Scans one literal span, appending either a trie-matched replacement
    /// or the verbatim code point at each position.
    fn emit_literal(&self, span: &str, working: &Trie, output: &mut String) {
        let chars: Vec<char> = span.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let window_end = (i + WINDOW_LEN).min(chars.len());
            let window: String = chars[i..window_end].iter().collect();
            if let Some((value, key_len)) = self.longest_prefix(&window, working) {
                output.push_str(&value);
                i += key_len;
            } else {
                output.push(chars[i]);
                i += 1;
            }
        }
    }

    /// Applies a single directive's effect on the output and/or the
    /// working trie.
    fn emit_directive(
        &self,
        directive: &Directive,
        options: ConvertOptions,
        working: &mut Trie,
        output: &mut String,
    ) {
        match &directive.rule {
            RuleBody::Raw { original } => {
                output.push_str(original);
                return;
            }
            RuleBody::Empty => return,
            RuleBody::Unidirectional { .. } | RuleBody::Omnidirectional { .. } => {}
        }

        if directive.flags.contains(&Flag::Title) || directive.flags.contains(&Flag::Description) {
            return;
        }

        if directive.flags.contains(&Flag::Show) || directive.flags.contains(&Flag::Copy) {
            let display = self.localize(directive).map(|(_, display)| display);
            output.push_str(display.as_deref().unwrap_or(""));
        }

        if options.sequential_global {
            if directive.flags.contains(&Flag::Hidden) || directive.flags.contains(&Flag::Copy) {
                self.install_rule(directive, working);
            }
            if directive.flags.contains(&Flag::Remove) {
                self.remove_rule(directive, working);
            }
        }
    }

    /// Chooses the single replacement text for a mapping-typed rule,
    /// walking the language's fallback chain followed by its own code, and
    /// returns the localized `(keys, display_text)` pair, or `None` if no
    /// tag in the chain is present in the rule's mapping.
    fn localize(&self, directive: &Directive) -> Option<(Vec<(String, String)>, String)> {
        let order = self
            .language
            .fallbacks()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.language.code()));

        match &directive.rule {
            RuleBody::Unidirectional { original, mapping } => {
                let chosen = order.into_iter().find_map(|tag| mapping.get(tag))?;
                Some((vec![(original.clone(), chosen.clone())], chosen.clone()))
            }
            RuleBody::Omnidirectional { mapping } => {
                let chosen = order.into_iter().find_map(|tag| mapping.get(tag))?;
                let keys = mapping
                    .values()
                    .map(|variant_text| (variant_text.clone(), chosen.clone()))
                    .collect();
                Some((keys, chosen.clone()))
            }
            RuleBody::Raw { .. } | RuleBody::Empty => None,
        }
    }

    /// Installs a directive's localized keys into `working`.
    fn install_rule(&self, directive: &Directive, working: &mut Trie) {
        match self.localize(directive) {
            Some((keys, _)) => {
                for (key, value) in keys {
                    working.insert(&key, value);
                }
            }
            None => log::trace!("localization miss installing {}", directive.rule),
        }
    }

    /// Deletes a directive's localized keys from `working`.
    fn remove_rule(&self, directive: &Directive, working: &mut Trie) {
        match self.localize(directive) {
            Some((keys, _)) => {
                for (key, _) in keys {
                    working.delete(&key);
                }
            }
            None => log::trace!("localization miss removing {}", directive.rule),
        }
    }
}
