quantity!(
    /// Dollars per kilowatt-hour.
    ///
    /// Kept at the full precision published in the tariff sheets.
    KilowattHourRate, "$/kWh"
);

impl KilowattHourRate {
    pub const ZERO: Self = Self(0.0);
}
