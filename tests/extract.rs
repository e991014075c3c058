// End-to-end extraction with dictionaries loaded from disk.

use std::io::Write;

use tempfile::NamedTempFile;
use tf_idf_tagger::{CutMode, Segmenter, TagExtractor, TaggerError};

const DICT: &str = "\
我们 500 r
研究 300 v
自然 200 n
语言 300 n
处理 400 v
自然语言处理 50 l
有趣 100 a
年 10 m
";

const IDF: &str = "\
研究 5.0
自然语言处理 12.0
2024 3.0
分词 7.0
";

const STOP: &str = "我们\n";

const SENTENCE: &str = "我们研究自然语言处理，自然语言处理很有趣。2024年";

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn loaded_extractor() -> TagExtractor {
    let dict = write_temp(DICT);
    let idf = write_temp(IDF);
    let stop = write_temp(STOP);
    let mut ex = TagExtractor::from_dictionary(dict.path()).unwrap();
    ex.load_idf(idf.path()).unwrap();
    ex.load_stop_words(stop.path()).unwrap();
    ex
}

#[test]
fn segmenter_cuts_loaded_dictionary() {
    let ex = loaded_extractor();
    let toks: Vec<&str> = ex.segmenter().cut(SENTENCE, CutMode::Precise).collect();
    assert_eq!(
        toks,
        vec!["我们", "研究", "自然语言处理", "，", "自然语言处理", "很", "有趣", "。", "2024", "年"]
    );
}

#[test]
fn extract_tags_weights_by_tf_idf() {
    let ex = loaded_extractor();
    assert_eq!(ex.idf().median(), 7.0);

    let tags = ex.extract_tags(SENTENCE, -1);
    let texts: Vec<&str> = tags.texts().collect();
    assert_eq!(texts, vec!["自然语言处理", "有趣", "研究", "2024"]);

    // 5 surviving tokens
    let expected = [12.0 * 0.4, 7.0 * 0.2, 5.0 * 0.2, 3.0 * 0.2];
    for (seg, want) in tags.iter().zip(expected) {
        assert!((seg.weight() - want).abs() < 1e-9, "{}: {} != {}", seg.text(), seg.weight(), want);
    }

    let top = ex.extract_tags(SENTENCE, 1);
    assert_eq!(top.texts().collect::<Vec<_>>(), vec!["自然语言处理"]);
}

#[test]
fn cn_extract_tags_drops_numbers_and_unknowns() {
    let ex = loaded_extractor();
    let (tags, words) = ex.cn_extract_tags(SENTENCE, -1);
    assert_eq!(words, vec!["研究", "自然语言处理", "自然语言处理", "有趣"]);
    let pairs: Vec<(&str, f64)> = tags.iter().map(|s| (s.text(), s.weight())).collect();
    assert_eq!(pairs, vec![("自然语言处理", 12.0), ("研究", 5.0)]);
}

#[test]
fn load_errors_surface_to_caller() {
    let mut ex = loaded_extractor();

    let bad_idf = write_temp("研究 5.0\n有趣 lots\n");
    let err = ex.load_idf(bad_idf.path()).unwrap_err();
    assert!(matches!(err, TaggerError::Parse { line: 2, .. }));
    assert!(err.to_string().ends_with(":2: invalid idf value `lots`"));
    // previous table still in use
    assert_eq!(ex.idf().len(), 4);

    let empty_dict = write_temp("\n");
    assert!(matches!(
        ex.load_dictionary(empty_dict.path()),
        Err(TaggerError::EmptyDictionary { .. })
    ));
    assert!(ex.segmenter().contains_word("自然语言处理"));

    assert!(matches!(
        TagExtractor::from_dictionary("/no/such/dict.txt"),
        Err(TaggerError::Io { .. })
    ));
}

#[test]
fn results_serialize_to_json() {
    let ex = loaded_extractor();
    let tags = ex.extract_tags(SENTENCE, 1);
    let json = serde_json::to_value(&tags).unwrap();
    assert_eq!(json[0]["text"], "自然语言处理");
}
