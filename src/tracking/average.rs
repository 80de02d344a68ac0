//! Windowed joint position average.

use std::collections::VecDeque;

/// Bounded window of raw samples for one joint, with a delayed mean.
///
/// The mean starts at the first sample and stays there while the window
/// fills. Once a push overflows the window the oldest sample is evicted and
/// the mean is recomputed, and from then on every push moves it.
///
/// ```
/// use red_light::tracking::RunningAverage;
///
/// let mut avg = RunningAverage::new(2, (0.0, 0.0));
/// avg.push((10.0, 10.0));
/// assert_eq!(avg.mean(), (0.0, 0.0)); // window not yet overflowed
///
/// avg.push((20.0, 20.0));
/// assert_eq!(avg.mean(), (15.0, 15.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RunningAverage {
    samples: VecDeque<(f32, f32)>,
    capacity: usize,
    mean: (f32, f32),
}

impl RunningAverage {
    /// Start a series at its first sample.
    pub fn new(capacity: usize, first: (f32, f32)) -> Self {
        assert!(capacity > 0, "window must hold at least 1 sample");

        let mut samples = VecDeque::with_capacity(capacity + 1);
        samples.push_back(first);
        Self {
            samples,
            capacity,
            mean: first,
        }
    }

    /// Append a sample, evicting and re-averaging once the window overflows.
    pub fn push(&mut self, sample: (f32, f32)) {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
            self.mean = self.window_mean();
        }
    }

    /// Current average position.
    #[must_use]
    pub fn mean(&self) -> (f32, f32) {
        self.mean
    }

    /// Samples currently in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn window_mean(&self) -> (f32, f32) {
        let n = self.samples.len() as f32;
        let (sum_x, sum_y) = self
            .samples
            .iter()
            .fold((0.0f32, 0.0f32), |(sx, sy), &(x, y)| (sx + x, sy + y));
        (sum_x / n, sum_y / n)
    }
}
