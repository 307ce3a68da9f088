use egui_kittest::Harness;
use egui_kittest::kittest::Queryable as _;

use glimpse_demo_lib::DemoWindows;

#[test]
fn widget_tour_is_open_by_default() {
    let mut demo_windows = DemoWindows::default();
    let mut harness = Harness::new(|ctx| demo_windows.ui(ctx));
    harness.run();

    assert!(
        harness
            .query_by_label("Welcome to the widget tour!")
            .is_some()
    );
    assert!(harness.query_by_label("amplitude").is_none());
}

#[test]
fn toggling_a_demo_opens_its_window() {
    let mut demo_windows = DemoWindows::default();
    let mut harness = Harness::new(|ctx| demo_windows.ui(ctx));
    harness.run();

    harness.get_by_label("📈 Signal plot").click();
    harness.step();
    harness.step();

    assert!(harness.query_by_label("amplitude").is_some());
}
