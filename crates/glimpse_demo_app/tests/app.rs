use egui_kittest::kittest::Queryable as _;

use glimpse_demo_app::WrapApp;

#[test]
fn the_top_bar_switches_between_panels() {
    let mut harness = egui_kittest::Harness::builder().build_eframe(|cc| WrapApp::new(cc));
    harness.run();

    // The demo windows are the default view:
    assert!(harness.query_by_label("Demo windows").is_some());

    harness.get_by_label("▶ Player").click();
    harness.run();
    assert!(harness.query_by_label("Loop").is_some());

    harness.get_by_label("👁 Detect").click();
    harness.run();
    assert!(harness.query_by_label("Detect this frame").is_some());
}
