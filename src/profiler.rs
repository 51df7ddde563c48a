use log::info;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

/// Valeur de métrique typée
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Usize(usize),
    F32(f32),
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Usize(v)
    }
}
impl From<f32> for MetricValue {
    fn from(v: f32) -> Self {
        MetricValue::F32(v)
    }
}

impl MetricValue {
    fn as_f64(&self) -> f64 {
        match self {
            MetricValue::Usize(u) => *u as f64,
            MetricValue::F32(v) => *v as f64,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Usize(u) => write!(f, "{}", u),
            MetricValue::F32(v) => write!(f, "{:.2}", v),
        }
    }
}

/// Résumé d'une série (moyenne, min, max)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    fn of(series: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        for x in series {
            count += 1;
            sum += x;
            min = min.min(x);
            max = max.max(x);
        }
        (count > 0).then(|| Summary {
            avg: sum / count as f64,
            min,
            max,
        })
    }
}

#[derive(Default)]
struct ProfilerInner {
    /// Durées des blocs mesurés (ms)
    samples: HashMap<String, VecDeque<f32>>,
    metrics: HashMap<String, VecDeque<MetricValue>>,
    frame_times: VecDeque<f32>,
    max_samples: usize,
}

fn push_bounded<T>(buffer: &mut VecDeque<T>, value: T, max: usize) {
    if buffer.len() >= max {
        buffer.pop_front();
    }
    buffer.push_back(value);
}

/// Profiler partagé : fenêtres glissantes de durées et de métriques.
#[derive(Clone)]
pub struct Profiler {
    inner: Arc<RwLock<ProfilerInner>>,
}

impl Profiler {
    pub fn new(max_samples: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ProfilerInner {
                max_samples: max_samples.max(1),
                ..ProfilerInner::default()
            })),
        }
    }

    // un verrou empoisonné ne contient que des statistiques : on continue avec
    fn read(&self) -> RwLockReadGuard<'_, ProfilerInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProfilerInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Mesure globale d'une frame (RAII)
    pub fn frame(&self) -> FrameGuard<'_> {
        FrameGuard {
            profiler: self,
            start: Instant::now(),
        }
    }

    pub fn record_metric<T: Into<MetricValue>>(&self, label: impl Into<String>, value: T) {
        let mut inner = self.write();
        let max = inner.max_samples;
        let buffer = inner.metrics.entry(label.into()).or_default();
        push_bounded(buffer, value.into(), max);
    }

    fn record_sample(&self, label: String, ms: f32) {
        let mut inner = self.write();
        let max = inner.max_samples;
        let buffer = inner.samples.entry(label).or_default();
        push_bounded(buffer, ms, max);
    }

    /// Profile un bloc de code et retourne sa valeur de retour
    pub fn profile_block<T, F>(&self, label: impl Into<String>, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let result = f();
        self.record_sample(label.into(), start.elapsed().as_secs_f32() * 1000.0);
        result
    }

    /// Nombre de frames dans la fenêtre courante
    pub fn frame_count(&self) -> usize {
        self.read().frame_times.len()
    }

    /// FPS moyen sur la fenêtre courante (temps mur)
    pub fn fps(&self) -> f32 {
        let inner = self.read();
        match Summary::of(inner.frame_times.iter().map(|&v| v as f64)) {
            Some(s) if s.avg > 0.0 => (1000.0 / s.avg) as f32,
            _ => 0.0,
        }
    }

    pub fn summary(&self) -> HashMap<String, Summary> {
        let inner = self.read();
        inner
            .samples
            .iter()
            .filter_map(|(k, v)| Summary::of(v.iter().map(|&x| x as f64)).map(|s| (k.clone(), s)))
            .collect()
    }

    pub fn metric_summary(&self, label: &str) -> Option<Summary> {
        let inner = self.read();
        inner
            .metrics
            .get(label)
            .and_then(|v| Summary::of(v.iter().map(MetricValue::as_f64)))
    }

    /// Dernière valeur enregistrée pour une métrique
    pub fn last_metric(&self, label: &str) -> Option<MetricValue> {
        self.read().metrics.get(label).and_then(|v| v.back().copied())
    }

    /// Log toutes les mesures vers l'info log avec un target spécifique
    pub fn log_metrics_for_target(&self, target: &str, show_fps: bool) {
        if show_fps {
            info!(target: target, "{:.2} FPS", self.fps());
        }
        let mut blocks: Vec<_> = self.summary().into_iter().collect();
        blocks.sort_by(|a, b| a.0.cmp(&b.0));
        for (label, s) in blocks {
            info!(
                target: target,
                "{}: avg = {:.3} ms | min = {:.3} ms | max = {:.3} ms",
                label, s.avg, s.min, s.max
            );
        }
        let mut labels: Vec<String> = self.read().metrics.keys().cloned().collect();
        labels.sort();
        for label in labels {
            if let Some(s) = self.metric_summary(&label) {
                info!(
                    target: target,
                    "{label}: avg={:.2}, min={:.2}, max={:.2}",
                    s.avg, s.min, s.max
                );
            }
        }
    }
}

/// Mesure globale d'une frame
pub struct FrameGuard<'a> {
    profiler: &'a Profiler,
    start: Instant,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        let dt = self.start.elapsed().as_secs_f32() * 1000.0;
        let mut inner = self.profiler.write();
        let max = inner.max_samples;
        push_bounded(&mut inner.frame_times, dt, max);
    }
}

/// Macro helper : déduit automatiquement le target via le module appelant
#[macro_export]
macro_rules! log_metrics {
    ($profiler:expr) => {
        $profiler.log_metrics_for_target(module_path!(), false);
    };
}

#[macro_export]
macro_rules! log_metrics_and_fps {
    ($profiler:expr) => {
        $profiler.log_metrics_for_target(module_path!(), true);
    };
}
