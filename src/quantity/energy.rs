quantity!(
    /// Consumed energy, usually cumulative over the billing period.
    KilowattHours, "kWh"
);

quantity!(
    /// Daily baseline allocation.
    DailyKilowattHours, "kWh/day"
);

impl DailyKilowattHours {
    /// Total allocation over a billing period of `n_days`.
    pub fn over_days(self, n_days: u32) -> KilowattHours {
        KilowattHours(self.0 * f64::from(n_days))
    }
}
