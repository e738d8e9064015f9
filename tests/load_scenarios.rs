//! End-to-end load scenarios through the public API.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use wcurve::curve::fasta::fasta_to_curve;
use wcurve::curve::{Curve, CurveRecord};
use wcurve::fetch::FileFetcher;
use wcurve::loader::{
    CurveFetcher, CurveLoader, LoadOutcome, Notifier, TransportError,
    Validity, PARSE_FAILURE_ALERT,
};
use wcurve::options::{CurveOptions, Options};
use wcurve::scene::{DrawType, Group};
use wcurve::WCurveError;

#[derive(Default)]
struct Alerts(RefCell<Vec<String>>);

impl Notifier for Alerts {
    fn alert(&self, message: &str) {
        self.0.borrow_mut().push(message.to_owned());
    }
}

struct Body(String);

impl Body {
    fn new(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl CurveFetcher for Body {
    fn fetch(&self, _url: &str) -> Result<String, TransportError> {
        Ok(self.0.clone())
    }
}

struct Unreachable;

impl CurveFetcher for Unreachable {
    fn fetch(&self, url: &str) -> Result<String, TransportError> {
        Err(TransportError::new("TypeError", format!("failed to fetch {url}")))
    }
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("wcurve-it-{}-{name}", std::process::id()))
}

#[test]
fn not_json_body_alerts_once_and_attaches_nothing() {
    let loader = CurveLoader::with_notifier(Alerts::default());
    let mut group = Group::new();

    let outcome = loader.load_from_url(&Body::new("not json"), "u", &mut group);

    assert_eq!(outcome.validity, Validity::Invalid);
    assert!(group.is_empty());
    assert_eq!(*loader.notifier().0.borrow(), vec![PARSE_FAILURE_ALERT]);
}

#[test]
fn wrong_record_shapes_fail_closed() {
    let loader = CurveLoader::with_notifier(Alerts::default());
    let mut group = Group::new();

    for body in [
        "[[1,2,3,4]]",
        "[[1,2,3,4,5,6]]",
        "[{\"x\":1}]",
        "[[\"1\",2,3,4,5]]",
        "[[1,2,3,4,5]] trailing",
    ] {
        let outcome = loader.load_from_url(&Body::new(body), body, &mut group);
        assert_eq!(outcome, LoadOutcome::invalid(), "{body}");
    }
    assert!(group.is_empty());
    assert_eq!(loader.notifier().0.borrow().len(), 5);
}

#[test]
fn transport_failure_names_the_error() {
    let loader = CurveLoader::with_notifier(Alerts::default());
    let mut group = Group::new();

    let outcome = loader.load_from_url(&Unreachable, "http://x", &mut group);

    assert!(!outcome.is_valid());
    let alerts = loader.notifier().0.borrow();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].contains("Error name: TypeError"));
    assert!(alerts[0].contains("Error message: failed to fetch http://x"));
}

#[test]
fn two_record_direct_load_attaches_one_renderable() {
    let curve: Curve = vec![
        CurveRecord::new(0.0, 0.0, 1.0, 1.0, 1.0),
        CurveRecord::new(1.0, -1.0, 1.0, 1.0, 1.0),
    ]
    .into();
    let loader = CurveLoader::new();
    let mut group = Group::new();

    let outcome = loader.load_from_data(&curve, &mut group);

    assert_eq!(outcome.count, 2);
    assert_eq!(outcome.z_scale, 0.03125);
    assert_eq!(group.len(), 1);
    let object = group.get(outcome.handle.unwrap()).unwrap();
    assert_eq!(object.mesh().positions().len(), 6);
    assert_eq!(object.mesh().colors().len(), 8);
}

#[test]
fn segment_patch_is_bounds_checked() {
    let curve: Curve = vec![CurveRecord::default(); 3].into();
    let mut group = Group::new();
    let handle = CurveLoader::new()
        .load_from_data(&curve, &mut group)
        .handle
        .unwrap();
    let before = group.get(handle).unwrap().mesh().colors().to_vec();

    let err = group.set_segment_color(handle, 2, [1.0, 0.0, 0.0]).unwrap_err();
    assert!(matches!(
        err,
        WCurveError::SegmentOutOfRange {
            segment: 2,
            segment_count: 2
        }
    ));
    assert_eq!(group.get(handle).unwrap().mesh().colors(), &before[..]);

    group.set_segment_color(handle, 1, [1.0, 0.5, 0.0]).unwrap();
    let after = group.get(handle).unwrap().mesh().colors();
    assert_eq!(after[..8], before[..8]);
    assert_eq!(after[8..], [1.0, 0.5, 0.0, 1.0, 1.0, 0.5, 0.0, 1.0]);
}

#[test]
fn background_file_load_completes_on_poll() {
    let path = temp_path("bg.json");
    std::fs::write(&path, "[[0,0,0,0,0],[1,1,0,0,0],[2,0,0,0,0]]").unwrap();
    let loader = CurveLoader::new();
    let mut group = Group::new();

    let mut pending = loader.spawn_load(FileFetcher, &path.to_string_lossy());
    let deadline = Instant::now() + Duration::from_secs(5);
    let outcome = loop {
        if let Some(outcome) = pending.poll(&loader, &mut group) {
            break outcome;
        }
        assert!(Instant::now() < deadline);
        std::thread::sleep(Duration::from_millis(1));
    };

    assert_eq!(outcome.count, 3);
    assert_eq!(pending.validity(), Validity::Valid);
    assert_eq!(group.len(), 1);
    let _ = std::fs::remove_file(path);
}

#[test]
fn options_file_drives_scales_and_draw_type() {
    let path = temp_path("options.toml");
    std::fs::write(
        &path,
        "[curve]\nxy_scale = 2.0\nz_scale = 0.5\ndraw_type = \"lines\"\n",
    )
    .unwrap();
    let options = Options::load(&path).unwrap();
    assert_eq!(options.camera, Options::default().camera);

    let loader = CurveLoader::new().with_options(options.curve);
    let mut group = Group::new();
    let outcome = loader.load_from_url(
        &Body::new("[[1,2,0,0,0],[3,4,0,0,0],[5,6,0,0,0]]"),
        "scenario",
        &mut group,
    );

    let object = group.get(outcome.handle.unwrap()).unwrap();
    assert_eq!(object.draw_type(), DrawType::Lines);
    assert_eq!(
        object.mesh().positions(),
        &[0.0, 4.0, 2.0, 0.5, 8.0, 6.0, 0.5, 8.0, 6.0, 1.0, 12.0, 10.0]
    );
    assert_eq!(outcome.z_scale, 0.5);
    let _ = std::fs::remove_file(path);
}

#[test]
fn fasta_feeds_the_direct_load_path() {
    let curve = fasta_to_curve(">seq1 test\nACGT\nTTAA\n").unwrap();
    assert_eq!(curve.len(), 8);

    let loader = CurveLoader::new().with_options(CurveOptions::default());
    let mut group = Group::new();
    let outcome = loader.load_from_data(&curve, &mut group);
    assert_eq!(outcome.count, 8);
    assert_eq!(
        group.get(outcome.handle.unwrap()).unwrap().mesh().segment_count(),
        7
    );
}
