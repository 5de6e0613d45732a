use average::{Mean, Variance};

impl<T> Aggregate for T where T: ?Sized {}

pub trait Aggregate {
    /// Arithmetic mean, or `None` for an empty iterator.
    #[must_use]
    fn mean<V>(self) -> Option<V>
    where
        Self: Sized + Iterator<Item = V>,
        V: Into<f64> + From<f64>,
    {
        let estimate: Mean = self.map(Into::<f64>::into).collect();
        if estimate.is_empty() { None } else { Some(Mean::mean(&estimate).into()) }
    }

    /// Sample standard deviation (`n - 1` denominator).
    ///
    /// Undefined for fewer than two values, hence `None`.
    #[must_use]
    fn sample_std_dev<V>(self) -> Option<V>
    where
        Self: Sized + Iterator<Item = V>,
        V: Into<f64> + From<f64>,
    {
        let estimate: Variance = self.map(Into::<f64>::into).collect();
        (estimate.len() >= 2).then(|| estimate.sample_variance().sqrt().into())
    }
}
