pub mod parametric;
pub mod primitives;
pub mod subdivision;
