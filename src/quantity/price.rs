quantity!(
    /// Energy price in euro per megawatt-hour, the unit the day-ahead market is quoted in.
    MegawattHourPrice,
    suffix: "€/MWh",
    precision: 2
);
