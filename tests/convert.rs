//! End-to-end conversion scenarios, driven only through the public API.
//!
//! These mirror the documented scenarios for a Simplified-Chinese target
//! with a small in-memory baseline dictionary standing in for the real
//! `zh-hans`/`zh-cn` rule set (bundled dictionaries are out of scope for
//! this crate; see `SPEC_FULL.md`).

use langconv::{ConvertOptions, Language, LanguageConverter, Trie};

fn zh_cn() -> Language {
    Language::new(
        "zh-cn",
        Trie::from_dict([
            ("電腦程式", "计算机程序"),
            ("中文", "中文"),
            ("維基百科", "维基百科"),
            ("繁簡處理", "繁简处理"),
            ("是", "是"),
            ("的", "的"),
            ("自動轉換", "自动转换"),
            ("目的", "目的"),
            ("適應", "适应"),
            ("不同用字模式的差異", "不同用字模式的差异"),
        ]),
        vec!["zh-hans".to_string()],
    )
}

#[test]
fn hidden_directive_rewrites_whole_document() {
    let language = zh_cn();
    let converter = LanguageConverter::from_language(&language);
    let text = "-{H|電腦程式=>zh-cn:电脑程序;}-中文維基百科繁簡處理是中文維基百科的自動轉換，\
                 目的是以電腦程式適應不同用字模式的差異。";
    let got = converter.convert(text, ConvertOptions::default());
    assert_eq!(
        got,
        "中文维基百科繁简处理是中文维基百科的自动转换，目的是以电脑程序适应不同用字模式的差异。"
    );
}

#[test]
fn copy_directive_emits_and_shadows_later_baseline_use() {
    let language = zh_cn();
    let converter = LanguageConverter::from_language(&language);
    let text = "中文維基百科繁簡處理目的是以-{A|zh-hant: 電腦程式; zh-hans: 电脑程序;}-適應。電腦程式";
    let got = converter.convert(text, ConvertOptions::default());
    assert_eq!(got, "中文维基百科繁简处理目的是以电脑程序适应。电脑程序");
}

#[test]
fn omnidirectional_rule_with_no_matching_fallback_falls_through() {
    let language = zh_cn();
    let converter = LanguageConverter::from_language(&language);
    let text = "以-{zh-hant: 電腦程式; zh-sg: 电脑程序;}-適應。電腦程式";
    let got = converter.convert(text, ConvertOptions::default());
    assert_eq!(got, "以适应。计算机程序");
}

#[test]
fn title_only_directive_is_dropped_from_output() {
    let language = zh_cn();
    let converter = LanguageConverter::from_language(&language);
    let got = converter.convert(
        "-{T|電腦程式=>zh-cn:电脑程序;}-",
        ConvertOptions::default(),
    );
    assert_eq!(got, "");
}

#[test]
fn flagless_directive_with_no_colon_is_raw() {
    let language = zh_cn();
    let converter = LanguageConverter::from_language(&language);
    let text = "-{中文維基百科…電腦程式}-";
    let got = converter.convert(text, ConvertOptions::default());
    assert_eq!(got, "中文維基百科…電腦程式");
}

#[test]
fn degenerate_inputs_pass_through_unchanged() {
    let language = zh_cn();
    let converter = LanguageConverter::from_language(&language);
    assert_eq!(converter.convert("-", ConvertOptions::default()), "-");
    assert_eq!(converter.convert("", ConvertOptions::default()), "");
}

#[test]
fn directive_at_document_boundaries_parses_correctly() {
    let language = zh_cn();
    let converter = LanguageConverter::from_language(&language);
    let text = "-{H|電腦程式=>zh-cn:电脑程序;}-電腦程式-{S|電腦程式=>zh-cn:别名;}-";
    let got = converter.convert(text, ConvertOptions::default());
    assert_eq!(got, "电脑程序别名");
}

#[test]
fn default_and_sequential_global_disagree_on_text_before_the_directive() {
    let language = zh_cn();
    let converter = LanguageConverter::from_language(&language);
    let text = "電腦程式-{H|電腦程式=>zh-cn:别名;}-電腦程式";

    let default_pass = converter.convert(text, ConvertOptions::default());
    assert_eq!(default_pass, "别名别名");

    let sequential = converter.convert(
        text,
        ConvertOptions {
            sequential_global: true,
            ..Default::default()
        },
    );
    assert_eq!(sequential, "计算机程序别名");
}
