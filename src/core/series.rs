mod aggregate;

pub use self::aggregate::Aggregate;
