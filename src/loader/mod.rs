//! Curve loading: fetch-and-parse or direct hand-off to the builder.
//!
//! Every load returns its own [`LoadOutcome`] (point count, z spacing,
//! validity, handle of the attached renderable). Failures are never
//! returned as errors: they are reported once through the loader's
//! [`Notifier`] and show up as [`Validity::Invalid`] in the outcome.

mod pending;

use std::fmt;

pub use pending::PendingLoad;

use crate::curve::{build_with_style, Curve};
use crate::options::CurveOptions;
use crate::scene::{ObjectHandle, SceneContainer};

/// Alert shown when a fetched body is not a usable curve.
pub const PARSE_FAILURE_ALERT: &str = "Invalid curve, please try again";

/// Alert shown when the transport itself fails.
#[must_use]
pub fn transport_failure_alert(error: &TransportError) -> String {
    format!(
        "An exception occurred in the script. Error name: {}. \
         Error message: {}",
        error.name, error.message
    )
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// A failure of the request mechanism itself (as opposed to a bad body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    /// Short error class, e.g. `"HostNotFound"`.
    pub name: String,
    /// Human-readable detail.
    pub message: String,
}

impl TransportError {
    /// Error with the given class and detail.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for TransportError {}

/// Retrieves the raw body of a curve resource.
pub trait CurveFetcher {
    /// Fetch the body at `url`. The status of the response is not
    /// inspected; only failures of the transport are errors.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request could not be performed.
    fn fetch(&self, url: &str) -> Result<String, TransportError>;
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Sink for user-facing failure alerts.
pub trait Notifier {
    /// Show `message` to the user.
    fn alert(&self, message: &str);
}

/// Notifier that writes alerts to the log at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        log::warn!("{message}");
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn alert(&self, message: &str) {
        (**self).alert(message);
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Whether a load produced usable curve data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Validity {
    /// The load has not completed.
    #[default]
    Unknown,
    /// The curve was parsed and attached.
    Valid,
    /// Parsing or transport failed; nothing was attached.
    Invalid,
}

/// Result of one load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadOutcome {
    /// Number of records in the loaded curve (0 unless valid).
    pub count: usize,
    /// z spacing between consecutive records (0 unless valid).
    pub z_scale: f32,
    /// Final validity of the load.
    pub validity: Validity,
    /// The attached renderable, when valid.
    pub handle: Option<ObjectHandle>,
}

impl LoadOutcome {
    /// Outcome of a failed load.
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            count: 0,
            z_scale: 0.0,
            validity: Validity::Invalid,
            handle: None,
        }
    }

    /// Whether the load attached a renderable.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validity == Validity::Valid
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Obtains curve data and builds it with the configured scale constants.
#[derive(Debug, Clone, Default)]
pub struct CurveLoader<N = LogNotifier> {
    notifier: N,
    options: CurveOptions,
}

impl CurveLoader {
    /// Loader with default scales that logs its alerts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: Notifier> CurveLoader<N> {
    /// Loader reporting alerts through `notifier`.
    pub fn with_notifier(notifier: N) -> Self {
        Self {
            notifier,
            options: CurveOptions::default(),
        }
    }

    /// Replace the scale and color constants.
    #[must_use]
    pub fn with_options(mut self, options: CurveOptions) -> Self {
        self.options = options;
        self
    }

    /// Active scale and color constants.
    pub fn options(&self) -> &CurveOptions {
        &self.options
    }

    /// The alert sink.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Fetch `url`, parse it and build the curve into `container`.
    ///
    /// Blocks for the duration of the fetch. See [`PendingLoad::spawn`] for
    /// the non-blocking variant.
    pub fn load_from_url<F, C>(
        &self,
        fetcher: &F,
        url: &str,
        container: &mut C,
    ) -> LoadOutcome
    where
        F: CurveFetcher + ?Sized,
        C: SceneContainer + ?Sized,
    {
        log::info!("loading curve from {url}");
        self.complete(url, fetcher.fetch(url), container)
    }

    /// Start fetching `url` on a background thread.
    ///
    /// Poll the returned [`PendingLoad`] with this loader to attach the
    /// curve.
    pub fn spawn_load<F>(&self, fetcher: F, url: &str) -> PendingLoad
    where
        F: CurveFetcher + Send + 'static,
    {
        log::info!("loading curve from {url}");
        PendingLoad::spawn(fetcher, url)
    }

    /// Build an already-parsed curve into `container`.
    pub fn load_from_data<C>(
        &self,
        curve: &Curve,
        container: &mut C,
    ) -> LoadOutcome
    where
        C: SceneContainer + ?Sized,
    {
        let handle = build_with_style(
            curve,
            container,
            self.options.xy_scale,
            self.options.z_scale,
            &self.options.style(),
        );
        LoadOutcome {
            count: curve.len(),
            z_scale: self.options.z_scale,
            validity: Validity::Valid,
            handle: Some(handle),
        }
    }

    /// Finish a load whose body (or transport failure) is already known.
    ///
    /// Shared by the blocking, background and browser load paths.
    pub fn complete<C>(
        &self,
        url: &str,
        body: Result<String, TransportError>,
        container: &mut C,
    ) -> LoadOutcome
    where
        C: SceneContainer + ?Sized,
    {
        let body = match body {
            Ok(body) => body,
            Err(e) => {
                log::warn!("transport failure for {url}: {e}");
                self.notifier.alert(&transport_failure_alert(&e));
                return LoadOutcome::invalid();
            }
        };

        match Curve::from_json(&body) {
            Ok(curve) => {
                let outcome = self.load_from_data(&curve, container);
                log::info!("loaded {} curve points from {url}", outcome.count);
                outcome
            }
            Err(e) => {
                log::warn!("rejected curve body from {url}: {e}");
                self.notifier.alert(PARSE_FAILURE_ALERT);
                LoadOutcome::invalid()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::{CurveFetcher, Notifier, TransportError};

    /// Notifier that remembers every alert.
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub(crate) alerts: RefCell<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_owned());
        }
    }

    /// Fetcher serving canned bodies; unknown URLs fail at the transport.
    #[derive(Clone, Default)]
    pub(crate) struct StaticFetcher {
        pub(crate) bodies: HashMap<String, String>,
    }

    impl StaticFetcher {
        pub(crate) fn serving(url: &str, body: &str) -> Self {
            let mut bodies = HashMap::new();
            let _ = bodies.insert(url.to_owned(), body.to_owned());
            Self { bodies }
        }
    }

    impl CurveFetcher for StaticFetcher {
        fn fetch(&self, url: &str) -> Result<String, TransportError> {
            self.bodies.get(url).cloned().ok_or_else(|| {
                TransportError::new("NetworkError", format!("no route to {url}"))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{RecordingNotifier, StaticFetcher};
    use super::*;
    use crate::curve::CurveRecord;
    use crate::scene::Group;

    #[test]
    fn url_with_valid_body_attaches_curve() {
        let fetcher = StaticFetcher::serving(
            "http://host/curve.json",
            "[[0,0,1,1,1],[1,1,1,1,1],[2,2,1,1,1]]",
        );
        let loader = CurveLoader::with_notifier(RecordingNotifier::default());
        let mut group = Group::new();

        let outcome =
            loader.load_from_url(&fetcher, "http://host/curve.json", &mut group);

        assert!(outcome.is_valid());
        assert_eq!(outcome.count, 3);
        assert_eq!(outcome.z_scale, 0.03125);
        assert_eq!(group.len(), 1);
        let mesh = group.get(outcome.handle.unwrap()).unwrap().mesh();
        // Second record scaled by the fixed xy constant.
        assert_eq!(mesh.positions()[4..6], [0.8, 0.8]);
        assert!(loader.notifier().alerts.borrow().is_empty());
    }

    #[test]
    fn unparseable_body_is_invalid_and_alerts() {
        let fetcher = StaticFetcher::serving("u", "not json");
        let loader = CurveLoader::with_notifier(RecordingNotifier::default());
        let mut group = Group::new();

        let outcome = loader.load_from_url(&fetcher, "u", &mut group);

        assert_eq!(outcome.validity, Validity::Invalid);
        assert_eq!(outcome.handle, None);
        assert!(group.is_empty());
        assert_eq!(
            *loader.notifier().alerts.borrow(),
            vec![PARSE_FAILURE_ALERT.to_owned()]
        );
    }

    #[test]
    fn transport_failure_alerts_with_name_and_message() {
        let fetcher = StaticFetcher::default();
        let loader = CurveLoader::with_notifier(RecordingNotifier::default());
        let mut group = Group::new();

        let outcome = loader.load_from_url(&fetcher, "http://gone", &mut group);

        assert_eq!(outcome, LoadOutcome::invalid());
        assert!(group.is_empty());
        let alerts = loader.notifier().alerts.borrow();
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("NetworkError"));
        assert!(alerts[0].contains("no route to http://gone"));
        assert_ne!(alerts[0], PARSE_FAILURE_ALERT);
    }

    #[test]
    fn direct_load_is_synchronous() {
        let curve: Curve = vec![
            CurveRecord::new(0.0, 0.0, 0.0, 0.0, 0.0),
            CurveRecord::new(1.0, 1.0, 0.0, 0.0, 0.0),
        ]
        .into();
        let loader = CurveLoader::new();
        let mut group = Group::new();

        let outcome = loader.load_from_data(&curve, &mut group);

        assert_eq!(outcome.count, 2);
        assert_eq!(outcome.validity, Validity::Valid);
        assert_eq!(group.len(), 1);
        assert!(group.get(outcome.handle.unwrap()).is_some());
    }

    #[test]
    fn each_load_owns_its_outcome() {
        let loader = CurveLoader::new().with_options(CurveOptions {
            z_scale: 0.5,
            ..CurveOptions::default()
        });
        let mut group = Group::new();
        let short: Curve = vec![CurveRecord::default(); 2].into();
        let long: Curve = vec![CurveRecord::default(); 5].into();

        let a = loader.load_from_data(&short, &mut group);
        let b = loader.load_from_data(&long, &mut group);

        assert_eq!((a.count, b.count), (2, 5));
        assert_eq!(a.z_scale, 0.5);
        assert_ne!(a.handle, b.handle);
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn configured_colors_reach_the_mesh() {
        let loader = CurveLoader::new().with_options(CurveOptions {
            segment_start_color: [1.0, 0.0, 0.0, 1.0],
            segment_end_color: [0.0, 1.0, 0.0, 1.0],
            ..CurveOptions::default()
        });
        let mut group = Group::new();
        let curve: Curve = vec![CurveRecord::default(); 2].into();

        let outcome = loader.load_from_data(&curve, &mut group);
        let mesh = group.get(outcome.handle.unwrap()).unwrap().mesh();
        assert_eq!(
            mesh.colors(),
            &[1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]
        );
    }
}
