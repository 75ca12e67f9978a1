//! Parser for inline `-{ ... }-` language-conversion directives.
//!
//! A directive carries a set of [`Flag`]s plus a typed [`RuleBody`]. The
//! grammar is small enough to parse by hand with `split`/`trim` rather than
//! reaching for a parser-combinator or PEG grammar.

use std::collections::BTreeMap;
use std::fmt;

/// A directive flag, one character wide in source markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    /// `H` — install a global rule; this directive emits nothing.
    Hidden,
    /// `A` — install a global rule and also emit the localized text.
    Copy,
    /// `-` — remove a previously installed global rule.
    Remove,
    /// `T` — override the page title. No effect on body output.
    Title,
    /// `D` — descriptive annotation. No effect on body output.
    Description,
    /// `R` — emit the enclosed text verbatim.
    Raw,
    /// `S` — emit the localized text; do not install a rule.
    Show,
    /// The real empty flag, `-{}-`.
    Empty,
}

impl Flag {
    /// Maps a single markup character to its `Flag`, or `None` if the
    /// character is not part of the flag table (this is the
    /// condition on which the strict policy below rejects the directive).
    fn from_char(c: &str) -> Option<Self> {
        match c {
            "H" => Some(Flag::Hidden),
            "A" => Some(Flag::Copy),
            "-" => Some(Flag::Remove),
            "T" => Some(Flag::Title),
            "D" => Some(Flag::Description),
            "R" => Some(Flag::Raw),
            "S" => Some(Flag::Show),
            "" => Some(Flag::Empty),
            _ => None,
        }
    }
}

/// An ordered, deduplicated set of [`Flag`]s. A directive with one flag is
/// simply a one-element set.
pub type FlagSet = std::collections::BTreeSet<Flag>;

/// The typed body of a directive, after `=>`/`;`/`:` parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleBody {
    /// `original => variant: text; ...` — a canonical source string with
    /// per-variant replacements.
    Unidirectional {
        /// The literal text this rule rewrites.
        original: String,
        /// Variant tag (lowercased) to replacement text.
        mapping: BTreeMap<String, String>,
    },
    /// `variant: text; variant: text; ...` — any listed variant text can be
    /// rewritten to any other, depending on the target language.
    Omnidirectional {
        /// Variant tag (lowercased) to replacement text.
        mapping: BTreeMap<String, String>,
    },
    /// An uninterpreted literal, copied verbatim on emit.
    Raw {
        /// The directive's inner text, unparsed.
        original: String,
    },
    /// The placeholder body of `-{}-`.
    Empty,
}

/// A parsed `-{ ... }-` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive {
    /// The flags carried by this directive.
    pub flags: FlagSet,
    /// The typed rule body.
    pub rule: RuleBody,
}

/// A directive that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// A character in the flag list before `|` was not one of the
    /// recognized single-character flags.
    #[error("unrecognized directive flag {0:?}")]
    UnknownFlag(String),
}

impl Directive {
    /// Parses a single directive, including its `-{` / `}-` delimiters.
    ///
    /// This crate takes the strict policy: an unrecognized
    /// flag character fails the whole parse rather than silently degrading
    /// to a raw directive. Callers that want the lenient behavior can catch
    /// the error and treat the directive's source span as literal text.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let body = source
            .strip_prefix("-{")
            .and_then(|s| s.strip_suffix("}-"))
            .unwrap_or(source)
            .trim();

        if let Some((flag_part, rule_part)) = body.split_once('|') {
            let flags = Self::parse_flags(flag_part.trim())?;
            let rule = Self::parse_rules(rule_part.trim());
            Ok(Self { flags, rule })
        } else {
            let rule = Self::parse_rules(body);
            let mut flags = FlagSet::new();
            flags.insert(match &rule {
                RuleBody::Raw { .. } => Flag::Raw,
                RuleBody::Empty => Flag::Empty,
                RuleBody::Unidirectional { .. } | RuleBody::Omnidirectional { .. } => Flag::Show,
            });
            Ok(Self { flags, rule })
        }
    }

    /// Parses a `;`-separated flag list into a [`FlagSet`].
    fn parse_flags(raw: &str) -> Result<FlagSet, ParseError> {
        if raw.is_empty() {
            let mut flags = FlagSet::new();
            flags.insert(Flag::Empty);
            return Ok(flags);
        }
        raw.split(';')
            .map(str::trim)
            .map(|c| Flag::from_char(c).ok_or_else(|| ParseError::UnknownFlag(c.to_string())))
            .collect()
    }

    /// Parses the rule portion of a directive body (everything after `|`,
    /// or the whole body when there is no flag section).
    fn parse_rules(raw: &str) -> RuleBody {
        if let Some((original, rest)) = raw.split_once("=>") {
            let original = original.trim().to_string();
            let mapping = Self::parse_mapping(rest.trim());
            RuleBody::Unidirectional { original, mapping }
        } else if !raw.contains(':') {
            if raw.is_empty() {
                RuleBody::Empty
            } else {
                RuleBody::Raw {
                    original: raw.to_string(),
                }
            }
        } else {
            RuleBody::Omnidirectional {
                mapping: Self::parse_mapping(raw),
            }
        }
    }

    /// Parses a `;`-separated list of `variant: replacement` entries.
    /// Pieces without a `:` are skipped; later entries overwrite earlier
    /// ones for the same (lowercased) variant tag.
    fn parse_mapping(raw: &str) -> BTreeMap<String, String> {
        let mut mapping = BTreeMap::new();
        for entry in raw.split(';') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            if let Some((variant, text)) = entry.split_once(':') {
                mapping.insert(variant.trim().to_lowercase(), text.trim().to_string());
            }
        }
        mapping
    }
}

impl fmt::Display for RuleBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleBody::Unidirectional { original, .. } => write!(f, "Unidirectional({original})"),
            RuleBody::Omnidirectional { .. } => write!(f, "Omnidirectional"),
            RuleBody::Raw { original } => write!(f, "Raw({original})"),
            RuleBody::Empty => write!(f, "Empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_directive_with_no_flag_and_no_colon() {
        let d = Directive::parse("-{中文維基百科…電腦程式}-").unwrap();
        assert_eq!(d.flags, [Flag::Raw].into_iter().collect());
        assert_eq!(
            d.rule,
            RuleBody::Raw {
                original: "中文維基百科…電腦程式".to_string()
            }
        );
    }

    #[test]
    fn empty_directive() {
        let d = Directive::parse("-{}-").unwrap();
        assert_eq!(d.flags, [Flag::Empty].into_iter().collect());
        assert_eq!(d.rule, RuleBody::Empty);
    }

    #[test]
    fn omnidirectional_rule_without_flag() {
        let d = Directive::parse("-{zh-hant: 電腦程式; zh-hans: 电脑程序;}-").unwrap();
        assert_eq!(d.flags, [Flag::Show].into_iter().collect());
        let RuleBody::Omnidirectional { mapping } = d.rule else {
            panic!("expected omnidirectional rule");
        };
        assert_eq!(mapping["zh-hant"], "電腦程式");
        assert_eq!(mapping["zh-hans"], "电脑程序");
    }

    #[test]
    fn unidirectional_rule_with_hidden_flag() {
        let d = Directive::parse("-{H|電腦程式=>zh-cn:电脑程序;}-").unwrap();
        assert_eq!(d.flags, [Flag::Hidden].into_iter().collect());
        let RuleBody::Unidirectional { original, mapping } = d.rule else {
            panic!("expected unidirectional rule");
        };
        assert_eq!(original, "電腦程式");
        assert_eq!(mapping["zh-cn"], "电脑程序");
    }

    #[test]
    fn copy_flag_with_omnidirectional_rule() {
        let d = Directive::parse("-{A|zh-hant: 電腦程式; zh-hans: 电脑程序;}-").unwrap();
        assert_eq!(d.flags, [Flag::Copy].into_iter().collect());
    }

    #[test]
    fn combined_flags_are_a_set() {
        let d = Directive::parse("-{H;A|foo=>zh-cn:bar;}-").unwrap();
        assert_eq!(d.flags, [Flag::Hidden, Flag::Copy].into_iter().collect());
    }

    #[test]
    fn variant_tags_are_lowercased_but_text_is_not() {
        let d = Directive::parse("-{ZH-Hans: 电脑程序;}-").unwrap();
        let RuleBody::Omnidirectional { mapping } = d.rule else {
            panic!("expected omnidirectional rule");
        };
        assert_eq!(mapping["zh-hans"], "电脑程序");
    }

    #[test]
    fn unknown_flag_is_a_parse_error() {
        let err = Directive::parse("-{Q|foo=>zh-cn:bar;}-").unwrap_err();
        assert!(matches!(err, ParseError::UnknownFlag(ref s) if s == "Q"));
    }

    #[test]
    fn title_and_description_flags_have_no_special_rule_shape() {
        let d = Directive::parse("-{T|電腦程式=>zh-cn:电脑程序;}-").unwrap();
        assert_eq!(d.flags, [Flag::Title].into_iter().collect());
    }

    #[test]
    fn dash_alone_is_not_a_directive_and_must_not_be_asked_to_parse() {
        // `"-"` is handled by the converter's segmentation, not by
        // `Directive::parse`, since it never matches the `-{...}-` pattern.
        // This test only documents that expectation for readers of this
        // module.
        assert!("-".strip_prefix("-{").is_none());
    }
}
