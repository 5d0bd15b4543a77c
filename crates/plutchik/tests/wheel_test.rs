use plutchik::geometry::polar_to_cartesian;
use plutchik::{Catalog, EmotionId, HoverRole, MotionConfig, Point, Ring, Wheel, WheelConfig};

fn wheel() -> Wheel {
    Wheel::new(
        Catalog::builtin().unwrap(),
        WheelConfig::default(),
        MotionConfig::default(),
    )
    .unwrap()
}

fn id(s: &str) -> EmotionId {
    EmotionId::new(s)
}

fn run_until_still(wheel: &mut Wheel) -> usize {
    let mut frames = 0;
    while wheel.tick(1.0 / 60.0) {
        frames += 1;
        assert!(frames < 600, "wheel never settled");
    }
    frames
}

#[test]
fn test_eight_by_three_wheel() {
    let wheel = wheel();
    let layout = wheel.layout();
    assert_eq!(layout.primary_step(), 45.0);

    let inner: Vec<_> = layout
        .wedges()
        .iter()
        .filter(|w| w.ring == Ring::Inner)
        .collect();
    assert_eq!(inner.len(), 8);
    assert_eq!(inner[1].sector.start_angle, 45.0);

    let outer: Vec<_> = layout
        .wedges()
        .iter()
        .filter(|w| w.ring == Ring::Outer)
        .collect();
    assert_eq!(outer.len(), 24);
    assert!(outer.iter().all(|w| (w.sector.span() - 15.0).abs() < 1e-9));
}

#[test]
fn test_hover_sub_emotion_highlights_family() {
    let mut wheel = wheel();
    assert!(wheel.on_enter(&id("terror")));
    run_until_still(&mut wheel);

    let scene = wheel.scene();
    let role = |s: &str| scene.wedge(&id(s)).map(|w| w.role);
    assert_eq!(role("terror"), Some(HoverRole::Own));
    assert_eq!(role("fear"), Some(HoverRole::Family));
    assert_eq!(role("awe"), Some(HoverRole::Family));
    assert_eq!(role("joy"), Some(HoverRole::Inactive));

    let offset = |s: &str| wheel.offset(&id(s)).unwrap().length();
    assert!((offset("terror") - 30.0).abs() < 1e-9);
    assert!((offset("apprehension") - 15.0).abs() < 1e-9);
    assert!((offset("fear") - 10.0).abs() < 1e-9);
    assert_eq!(offset("anger"), 0.0);
    assert_eq!(wheel.detail().current().title(), "Terror");
}

#[test]
fn test_leave_settles_back_to_rest() {
    let mut wheel = wheel();
    wheel.on_enter(&id("anticipation"));
    for _ in 0..5 {
        wheel.tick(1.0 / 60.0);
    }

    assert!(wheel.on_leave(&id("anticipation")));
    assert!(wheel.highlight().is_idle());
    assert!(
        wheel
            .layout()
            .wedges()
            .iter()
            .all(|w| wheel.target_offset(&w.id) == Some(Point::ZERO))
    );

    run_until_still(&mut wheel);
    assert!(wheel.offsets().iter().all(|p| *p == Point::ZERO));
    assert_eq!(wheel.detail().current().title(), "Hover over a segment");
}

#[test]
fn test_reload_with_stale_hover() {
    let mut wheel = wheel();
    wheel.on_enter(&id("vigilance"));

    let data = r##"
[[emotions]]
id = "calm"
name = "Calm"
color = "#34D399"

  [[emotions.children]]
  id = "still"
  name = "Still"
  color = "#6EE7B7"
"##;
    wheel
        .reload(
            Catalog::from_toml_str(data).unwrap(),
            WheelConfig::default(),
            MotionConfig::default(),
        )
        .unwrap();

    assert!(wheel.highlight().is_idle());
    assert_eq!(wheel.layout().wedges().len(), 2);
    assert!(!wheel.on_enter(&id("vigilance")));
    assert!(wheel.on_enter(&id("still")));
    assert_eq!(wheel.highlight().active_family_id(), Some(&id("calm")));
}

#[test]
fn test_pointer_drives_hover() {
    let mut wheel = wheel();
    let center = wheel.config().center();

    // outer ring at 70 degrees is trust's second child
    assert!(wheel.pointer_moved(polar_to_cartesian(center, 320.0, 70.0)));
    assert_eq!(wheel.highlight().hovered_id(), Some(&id("admiration")));

    assert!(wheel.pointer_moved(Point::new(0.0, 0.0)));
    assert!(wheel.highlight().is_idle());
}

#[test]
fn test_svg_export() {
    let mut wheel = wheel();
    wheel.on_enter(&id("joy"));
    wheel.settle();

    let svg = wheel.scene().to_svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"viewBox="0 0 1000 1000""#));
    assert_eq!(svg.matches("<path").count(), 32);
    assert!(svg.contains(r#"class="wedge inner own" data-id="joy""#));
    assert!(svg.contains(">Serenity</text>"));
    assert!(svg.trim_end().ends_with("</svg>"));
}
