//! Shared test doubles for the clock, sleeper, HTTP transport and log output.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use crate::time::{Clock, Sleeper};
use crate::webhook::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<SystemTime>>,
}

impl ManualClock {
    /// Starts the clock at `secs` seconds after the Unix epoch.
    pub fn new(secs: u64) -> Self {
        Self {
            now: Arc::new(Mutex::new(
                SystemTime::UNIX_EPOCH + Duration::from_secs(secs),
            )),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }

    pub fn rewind(&self, by: Duration) {
        *self.now.lock().unwrap() -= by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock().unwrap()
    }
}

/// A sleeper that records requested delays and returns immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    delays: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }

    pub fn total(&self) -> Duration {
        self.delays().iter().sum()
    }
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// HTTP client that replays a script of results, then a fallback status.
#[derive(Debug, Clone)]
pub struct ScriptedClient {
    inner: Arc<ScriptedInner>,
}

#[derive(Debug)]
struct ScriptedInner {
    script: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    fallback: http::StatusCode,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedClient {
    pub fn new(script: Vec<Result<HttpResponse, HttpError>>, fallback: http::StatusCode) -> Self {
        Self {
            inner: Arc::new(ScriptedInner {
                script: Mutex::new(script.into()),
                fallback,
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Every request succeeds with 200 OK.
    pub fn ok() -> Self {
        Self::new(Vec::new(), http::StatusCode::OK)
    }

    /// Every request is answered with `status`.
    pub fn always(status: http::StatusCode) -> Self {
        Self::new(Vec::new(), status)
    }

    /// The first `failures` requests time out, the rest succeed.
    pub fn failing_then_ok(failures: usize) -> Self {
        let script = (0..failures).map(|_| Err(HttpError::Timeout)).collect();
        Self::new(script, http::StatusCode::OK)
    }

    pub fn calls(&self) -> usize {
        self.inner.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    /// Decodes every captured body as JSON.
    pub fn json_bodies(&self) -> Vec<serde_json::Value> {
        self.requests()
            .iter()
            .map(|r| serde_json::from_slice(r.body.as_deref().unwrap_or_default()).unwrap())
            .collect()
    }
}

impl HttpClient for ScriptedClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.inner.requests.lock().unwrap().push(req);
        let next = self.inner.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(HttpResponse::with_status(self.inner.fallback)))
    }
}

pub fn test_url() -> url::Url {
    url::Url::parse("https://hooks.slack.com/services/T000/B111/xyz").unwrap()
}

/// Collects formatted log lines written on the current thread.
///
/// Only events emitted while the guard from [`CapturedLogs::install`] is
/// alive are captured, so tests should run on a current-thread runtime.
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let buf = Arc::clone(&self.buf);
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || LogWriter(Arc::clone(&buf)))
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }
}

struct LogWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
