// twembed-core/tests/sanitizer_tests.rs
//! Whitelist filtering against the built-in table.

use test_log::test;
use twembed_core::{
    compile_whitelist, sanitize, EmbedConfig, EmbedEngine, RawAttributes, Whitelist,
};

fn whitelist() -> Whitelist {
    compile_whitelist(&EmbedConfig::default()).expect("default whitelist compiles")
}

fn raw(pairs: &[(&str, &str)]) -> RawAttributes {
    pairs.iter().copied().collect()
}

#[test]
fn every_output_key_is_prefixed_and_whitelisted() {
    let wl = whitelist();
    let input = raw(&[
        ("href", "https://twitter.com/alice"),
        ("screen-name", "alice"),
        ("class", "evil"),
        ("style", "display:none"),
        ("data-height", "1"),
        ("onload", "alert(1)"),
        ("width", "300"),
        ("theme", "light"),
        ("related", "bob,carol"),
    ]);
    let out = sanitize(&input, &wl);

    for key in out.keys() {
        let name = key.strip_prefix("data-").expect("every key is prefixed");
        assert!(wl.contains(name), "unlisted key leaked: {key}");
    }
    assert!(!out.contains_key("data-href"));
    assert!(!out.contains_key("data-class"));
    assert!(!out.contains_key("data-data-height"));
    assert_eq!(out.get("data-screen-name"), Some("alice"));
    assert_eq!(out.get("data-width"), Some("300"));
    assert_eq!(out.get("data-related"), Some("bob,carol"));
    assert_eq!(out.get("data-height"), Some("500"));
}

#[test]
fn numeric_fields_reject_signs_whitespace_and_units() {
    let wl = whitelist();
    for value in ["-5", "+5", " 5", "5 ", "5px", "1e3", "0x10", "五"] {
        for field in ["width", "height", "tweet-limit", "widget-id", "user-id", "list-id", "tweet-id"] {
            let out = sanitize(&raw(&[(field, value)]), &wl);
            let key = format!("data-{field}");
            if field == "height" {
                assert_eq!(out.get(&key), Some("500"), "{field}={value:?}");
            } else {
                assert!(!out.contains_key(&key), "{field}={value:?}");
            }
        }
    }
}

#[test]
fn colors_accept_three_or_six_hex_digits() {
    let wl = whitelist();
    let ok = sanitize(&raw(&[("link-color", "#ABC"), ("border-color", "#a1b2c3")]), &wl);
    assert_eq!(ok.get("data-link-color"), Some("#ABC"));
    assert_eq!(ok.get("data-border-color"), Some("#a1b2c3"));

    for bad in ["#abcd", "abc", "#ggg", "red", "x#fff", "#fff\"onload=\""] {
        let out = sanitize(&raw(&[("link-color", bad)]), &wl);
        assert!(!out.contains_key("data-link-color"), "color: {bad:?}");
    }
}

#[test]
fn locale_accepts_two_to_five_letters_or_hyphens() {
    let wl = whitelist();
    for good in ["en", "EN", "pt-br", "zh-cn"] {
        assert_eq!(sanitize(&raw(&[("lang", good)]), &wl).get("data-lang"), Some(good));
    }
    for bad in ["e", "en-GBX", "en_GB", "e1"] {
        assert!(!sanitize(&raw(&[("lang", bad)]), &wl).contains_key("data-lang"), "lang: {bad}");
    }
}

#[test]
fn enumerated_fields_accept_only_their_tokens() {
    let wl = whitelist();
    let good = raw(&[
        ("aria-polite", "Assertive"),
        ("theme", "dark"),
        ("cards", "hidden"),
        ("conversation", "NONE"),
        ("align", "right"),
        ("show-replies", "false"),
        ("dnt", "TRUE"),
    ]);
    let out = sanitize(&good, &wl);
    assert_eq!(out.len(), good.len() + 1);

    let bad = raw(&[
        ("aria-polite", "rude"),
        ("theme", "dark light"),
        ("cards", "visible"),
        ("conversation", "all"),
        ("align", "middle"),
        ("show-replies", "yes"),
        ("dnt", "1"),
    ]);
    let out = sanitize(&bad, &wl);
    assert_eq!(out.len(), 1);
}

#[test]
fn chrome_token_lists() {
    let wl = whitelist();
    let accepted = sanitize(&raw(&[("chrome", "noheader nofooter")]), &wl);
    assert_eq!(accepted.get("data-chrome"), Some("noheader nofooter"));

    let all_five = "noheader nofooter noborders noscrollbar transparent";
    assert_eq!(sanitize(&raw(&[("chrome", all_five)]), &wl).get("data-chrome"), Some(all_five));

    for bad in ["noheader bogus", "noheader,nofooter", "noheader noheader"] {
        let out = sanitize(&raw(&[("chrome", bad)]), &wl);
        assert!(!out.contains_key("data-chrome"), "chrome: {bad:?}");
    }
}

#[test]
fn sanitizer_runs_even_when_classification_fails() {
    let engine = EmbedEngine::new(EmbedConfig::default()).unwrap();
    let input = raw(&[("theme", "dark")]);
    assert!(engine.prepare(&input).is_rejected());

    let attrs = engine.sanitizer().sanitize(&input);
    assert_eq!(attrs.get("data-theme"), Some("dark"));
}
