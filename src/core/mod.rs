//! Pure coordinate math: locator decoding and distance strategies.

/// Distance strategies over two coordinates.
pub mod distance;
/// Maidenhead grid locator codec.
pub mod locator;
