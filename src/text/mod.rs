/// Font registry and CSS family resolution.
pub mod fonts;
/// `parley`-backed shaping and measurement.
pub mod engine;
pub mod measure;
