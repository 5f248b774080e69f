//! Live-capture flow: an empty document accumulates recorded strokes and
//! serializes them like any loaded document.

use inkline::{
    render_to_svg, save_to_inkml, InkDocument, InkLoader, RenderSettings, TraceRecorder,
};

fn record_stroke(document: &mut InkDocument, points: &[(i64, i64)]) {
    let mut recorder = TraceRecorder::new(None, None);
    for &(x, y) in points {
        recorder.push_point(vec![x, y]);
    }
    recorder.finish(document);
}

#[test]
fn test_capture_accumulates_points_in_order() {
    let mut document = InkDocument::new();
    record_stroke(&mut document, &[(0, 0), (4, 2), (9, 5)]);
    record_stroke(&mut document, &[(20, 20)]);

    assert_eq!(document.traces().len(), 2);
    assert_eq!(document.traces()[0].table, vec![vec![0, 0], vec![4, 2], vec![9, 5]]);
    assert_eq!(document.aggregates().count(0), 4);
    assert_eq!(document.aggregates().max(0), Some(20));
}

#[test]
fn test_captured_document_saves_and_reloads() {
    let mut document = InkDocument::new();
    record_stroke(&mut document, &[(10, 30)]);

    let inkml = save_to_inkml(&document).unwrap();
    let reloaded = InkLoader::new().load_str(&inkml).unwrap();

    assert_eq!(reloaded.traces().len(), 1);
    // single-point tables survive the uncompressed encode exactly
    assert_eq!(reloaded.traces()[0].table, vec![vec![10, 30]]);
}

#[test]
fn test_captured_traces_without_context_report_but_do_not_crash() {
    let mut document = InkDocument::new();
    record_stroke(&mut document, &[(0, 0), (5, 5)]);

    let (svg, problems) = render_to_svg(&document, RenderSettings::default()).unwrap();
    assert_eq!(problems.len(), 1);
    assert_eq!(svg.matches("<path").count(), 0);
}
