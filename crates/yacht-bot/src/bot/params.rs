/// Tunable Monte Carlo parameters for the holding tiers.
///
/// Tests run with a handful of trials; interactive play uses the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationParams {
    /// Simulated continuations per open category (default: 2000)
    trials: u32,
}

impl SimulationParams {
    pub const DEFAULT_TRIALS: u32 = 2000;

    /// Trial counts below one are raised to one.
    pub const fn new(trials: u32) -> Self {
        Self {
            trials: if trials == 0 { 1 } else { trials },
        }
    }

    pub const fn trials(self) -> u32 {
        self.trials
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TRIALS)
    }
}

#[cfg(test)]
mod tests {
    use super::SimulationParams;

    #[test]
    fn default_matches_documented_trials() {
        assert_eq!(SimulationParams::default().trials(), 2000);
    }

    #[test]
    fn zero_trials_is_clamped() {
        assert_eq!(SimulationParams::new(0).trials(), 1);
        assert_eq!(SimulationParams::new(25).trials(), 25);
    }
}
