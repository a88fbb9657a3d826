pub mod component;
pub mod stage;

pub use component::{Capability, Component};
pub use stage::{DestructuringPolicy, Enricher, ExpressionSwitch, Filter, Formatter, Sink};
