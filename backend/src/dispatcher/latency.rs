//! Simulated network latency
//!
//! Every mock call sleeps for a random duration inside a per-method window.
//! The sleep races the caller's cancellation token, so an abandoned request
//! resolves with `AppError::Cancelled` instead of a stale result.

use crate::error::AppError;
use rand::Rng;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Inclusive bounds of a simulated round-trip, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyWindow {
    /// Shortest delay
    pub min_ms: u64,
    /// Longest delay
    pub max_ms: u64,
}

impl LatencyWindow {
    /// Window for reads
    pub const GET: Self = Self::new(100, 300);
    /// Window for partial updates
    pub const PATCH: Self = Self::new(150, 400);
    /// Window for chat and agent actions
    pub const POST: Self = Self::new(200, 500);

    /// Create a window; bounds are swapped if given in the wrong order
    pub const fn new(min_ms: u64, max_ms: u64) -> Self {
        if min_ms <= max_ms {
            Self { min_ms, max_ms }
        } else {
            Self {
                min_ms: max_ms,
                max_ms: min_ms,
            }
        }
    }
}

/// Largest multiplier a profile accepts
pub const MAX_LATENCY_SCALE: f64 = 100.0;

/// How the dispatcher simulates latency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyProfile {
    /// When false every call resolves without sleeping
    pub enabled: bool,
    /// Multiplier applied to every window
    pub scale: f64,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::scaled(1.0)
    }
}

impl LatencyProfile {
    /// Latency enabled, windows multiplied by `scale`
    ///
    /// Scales above `MAX_LATENCY_SCALE` are clamped to it.
    pub fn scaled(scale: f64) -> Self {
        let scale = if scale.is_finite() && scale >= 0.0 {
            scale.min(MAX_LATENCY_SCALE)
        } else {
            1.0
        };
        Self {
            enabled: true,
            scale,
        }
    }

    /// No simulated latency
    pub fn none() -> Self {
        Self {
            enabled: false,
            scale: 0.0,
        }
    }

    /// Draw one delay from the window
    pub fn sample(&self, window: LatencyWindow) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let ms = rand::thread_rng().gen_range(window.min_ms..=window.max_ms);
        Duration::try_from_secs_f64(ms as f64 * self.scale / 1000.0)
            .unwrap_or_else(|_| Duration::from_millis(window.max_ms))
    }
}

/// Sleep for one sampled delay unless `token` fires first
///
/// Returns the delay that was waited out.
pub async fn simulate(
    profile: LatencyProfile,
    window: LatencyWindow,
    token: &CancellationToken,
    path: &str,
) -> Result<Duration, AppError> {
    if token.is_cancelled() {
        return Err(AppError::Cancelled(path.to_string()));
    }

    let delay = profile.sample(window);
    if delay.is_zero() {
        return Ok(delay);
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(AppError::Cancelled(path.to_string())),
        _ = tokio::time::sleep(delay) => Ok(delay),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stays_in_window() {
        let profile = LatencyProfile::default();
        for _ in 0..200 {
            let delay = profile.sample(LatencyWindow::PATCH);
            assert!(delay >= Duration::from_millis(150));
            assert!(delay <= Duration::from_millis(400));
        }
    }

    #[test]
    fn test_huge_scale_is_clamped() {
        let profile = LatencyProfile::scaled(1e20);
        assert_eq!(profile.scale, MAX_LATENCY_SCALE);
        let delay = profile.sample(LatencyWindow::GET);
        assert!(delay <= Duration::from_millis(300 * MAX_LATENCY_SCALE as u64));
    }

    #[test]
    fn test_unrepresentable_delay_falls_back_to_window_max() {
        let profile = LatencyProfile {
            enabled: true,
            scale: f64::MAX,
        };
        assert_eq!(profile.sample(LatencyWindow::GET), Duration::from_millis(300));
    }

    #[test]
    fn test_disabled_profile_never_sleeps() {
        assert_eq!(LatencyProfile::none().sample(LatencyWindow::POST), Duration::ZERO);
    }

    #[test]
    fn test_window_bounds_are_ordered() {
        let window = LatencyWindow::new(500, 200);
        assert_eq!(window.min_ms, 200);
        assert_eq!(window.max_ms, 500);
    }

    #[tokio::test]
    async fn test_precancelled_token_fails_even_without_latency() {
        let token = CancellationToken::new();
        token.cancel();
        let result = simulate(LatencyProfile::none(), LatencyWindow::GET, &token, "/agents").await;
        assert!(matches!(result, Err(AppError::Cancelled(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_sleep() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            canceller.cancel();
        });

        let result = simulate(LatencyProfile::default(), LatencyWindow::GET, &token, "/agents").await;
        assert!(matches!(result, Err(AppError::Cancelled(path)) if path == "/agents"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sleep_completes() {
        let token = CancellationToken::new();
        let delay = simulate(LatencyProfile::default(), LatencyWindow::GET, &token, "/agents")
            .await
            .unwrap();
        assert!(delay >= Duration::from_millis(100));
    }
}
