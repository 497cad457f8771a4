//! Integration tests for the Aspectra decoding pipeline.

use std::io::Write;

use aspectra_core::{
    AspectraError, DecoderConfig, LabelMap, SentimentAnalyzer, SentimentResult, SpanDecoder,
    segment_text,
};
use tempfile::NamedTempFile;

/// Writes the extraction label dictionary used by the demo model.
fn write_label_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "O").unwrap();
    writeln!(file, "B-Aspect").unwrap();
    writeln!(file, "I-Aspect").unwrap();
    writeln!(file, "B-Opinion").unwrap();
    writeln!(file, "I-Opinion").unwrap();
    file
}

fn tags_for(spec: &[(&str, usize)]) -> Vec<String> {
    spec.iter()
        .flat_map(|(tag, n)| std::iter::repeat_n(tag.to_string(), *n))
        .collect()
}

#[test]
fn test_decode_from_label_file() {
    let file = write_label_file();
    let labels = LabelMap::from_file(file.path()).unwrap();
    assert_eq!(labels.len(), 5);

    // 店家服务很热情，菜品一般
    let ids = [1, 2, 2, 2, 0, 3, 4, 0, 1, 2, 3, 4];
    let groups = SpanDecoder::default()
        .decode_ids("店家服务很热情，菜品一般", &ids, &labels)
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].to_vec(), ["店家服务", "热情"]);
    assert_eq!(groups[1].to_vec(), ["菜品", "一般"]);
}

#[test]
fn test_missing_label_file() {
    let err = LabelMap::from_file("/nonexistent/labels.txt").unwrap_err();
    assert!(matches!(err, AspectraError::Io(_)));
}

#[test]
fn test_orphans_across_many_clauses() {
    // 好吃，便宜，实惠
    let tags = tags_for(&[
        ("B-Opinion", 1),
        ("I-Opinion", 1),
        ("O", 1),
        ("B-Opinion", 1),
        ("I-Opinion", 1),
        ("O", 1),
        ("B-Opinion", 1),
        ("I-Opinion", 1),
    ]);
    let groups = SpanDecoder::default().decode("好吃，便宜，实惠", &tags).unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].is_orphan());
    assert_eq!(groups[0].to_vec(), ["None", "好吃", "便宜", "实惠"]);
}

#[test]
fn test_segments_partition_input() {
    let text = "。开头,中间;结尾!";
    let tags = vec!["O"; text.chars().count()];
    let segments = segment_text(text, &tags).unwrap();

    let joined: String = segments.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(joined, text);
    assert_eq!(segments.len(), 5);
    assert_eq!(segments[0].0, "");

    let total_tags: usize = segments.iter().map(|(_, t)| t.len()).sum();
    assert_eq!(total_tags, tags.len());
}

#[test]
fn test_custom_punctuation_changes_attachment() {
    // With a space as the only separator, "好" stays in the aspect's clause.
    let config = DecoderConfig::new().with_punctuation([' ']);
    let decoder = SpanDecoder::new(config);
    let tags = ["B-Aspect", "I-Aspect", "O", "B-Opinion"];
    let groups = decoder.decode("屏幕,好", &tags).unwrap();
    assert_eq!(groups[0].to_vec(), ["屏幕", "好"]);
}

#[test]
fn test_analyzer_output_serializes() {
    let analyzer = SentimentAnalyzer::new(
        SpanDecoder::default(),
        |_: &str, _: &str| -> aspectra_core::Result<String> { Ok("正向".to_string()) },
    );
    let tags = ["B-Aspect", "I-Aspect", "B-Opinion", "O", "B-Opinion"];
    let results = analyzer.analyze("服务好，好", &tags).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].opinions, ["好"]);

    let json = serde_json::to_string(&results).unwrap();
    let back: Vec<SentimentResult> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, results);
}

#[test]
fn test_length_mismatch_leaves_other_decodes_untouched() {
    let decoder = SpanDecoder::default();
    let bad = decoder.decode("abcde", &["O"; 6]);
    assert!(matches!(
        bad,
        Err(AspectraError::LengthMismatch {
            text_len: 5,
            tag_len: 6
        })
    ));

    let good = decoder.decode("abc", &["B-Aspect", "I-Aspect", "O"]).unwrap();
    assert_eq!(good[0].aspect, "ab");
}
