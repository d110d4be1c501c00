// Unit tests for domain models

use super::*;

#[test]
fn test_default_variant_file_names() {
    let variant = Variant::mandarin();
    assert!(variant.is_default());
    assert_eq!(variant.audio_file_name(3), "audio_3.wav");
    assert_eq!(variant.segment_file_name(3), "segment_3.mp4");
    assert_eq!(variant.manifest_file_name(), "concat_list.txt");
}

#[test]
fn test_spanish_variant_file_names() {
    let variant = Variant::spanish();
    assert!(!variant.is_default());
    assert_eq!(variant.audio_file_name(12), "audio_12_es.wav");
    assert_eq!(variant.segment_file_name(12), "segment_es_12.mp4");
    assert_eq!(variant.manifest_file_name(), "concat_list_es.txt");
}

#[test]
fn test_image_names_are_not_padded() {
    assert_eq!(image_file_name(1), "image_1.png");
    assert_eq!(image_file_name(100), "image_100.png");
}

#[test]
fn test_content_layout_paths() {
    let layout = ContentLayout::new("/data/lesson");
    let spanish = Variant::spanish();

    assert_eq!(layout.segments_dir(), Path::new("/data/lesson/segments"));
    assert_eq!(
        layout.segment_path(&spanish, 2),
        PathBuf::from("/data/lesson/segments/segment_es_2.mp4")
    );
    assert_eq!(
        layout.manifest_path(&spanish),
        PathBuf::from("/data/lesson/segments/concat_list_es.txt")
    );

    let pair = layout.asset_pair(&spanish, 4);
    assert_eq!(pair.index, 4);
    assert_eq!(pair.image, PathBuf::from("/data/lesson/image_4.png"));
    assert_eq!(pair.audio, PathBuf::from("/data/lesson/audio_4_es.wav"));
}

#[test]
fn test_output_target_naming() {
    let fixed = OutputTarget::new("/data/lesson/output", OutputNaming::Static);
    assert_eq!(fixed.path(), PathBuf::from("/data/lesson/output/final_video.mp4"));

    let stamped = OutputTarget::new(
        "/videos/es",
        OutputNaming::Timestamped("20240131_235959".to_string()),
    );
    assert_eq!(stamped.path(), PathBuf::from("/videos/es/20240131_235959.mp4"));
}

#[test]
fn test_run_report_aggregation() {
    let mut report = RunReport::new("/data", Layout::Multi);
    assert!(!report.all_succeeded());

    let batch = SegmentBatch {
        artifacts: vec![SegmentArtifact {
            index: 1,
            path: PathBuf::from("/data/segments/segment_1.mp4"),
        }],
        skipped: vec![2],
    };
    report.push(VariantOutcome::completed(
        Variant::mandarin(),
        &batch,
        FinalOutput {
            path: PathBuf::from("/data/output/final_video.mp4"),
            size_bytes: 2048,
        },
    ));
    assert!(report.all_succeeded());

    report.push(VariantOutcome::failed(Variant::spanish(), "boom"));
    assert!(!report.all_succeeded());
    assert_eq!(report.failed_count(), 1);
}

#[test]
fn test_run_report_json_shape() {
    let mut report = RunReport::new("/data", Layout::Single);
    report.push(VariantOutcome::failed(Variant::spanish(), "no segments"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["layout"], "single");
    assert_eq!(json["content_dir"], "/data");
    let outcome = &json["outcomes"][0];
    assert_eq!(outcome["status"], "failed");
    assert_eq!(outcome["reason"], "no segments");
    assert_eq!(outcome["variant"]["suffix"], "_es");
}
