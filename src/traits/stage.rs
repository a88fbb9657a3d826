use crate::events::{LogEvent, PropertyValue};

/// Receives fully processed log events. Declared under `WriteTo`.
pub trait Sink: Send + Sync {
    fn emit(&self, event: &LogEvent);
}

/// Decides whether an event continues through the pipeline. Declared under
/// `Filter`; filters apply in declaration order.
pub trait Filter: Send + Sync {
    fn is_enabled(&self, event: &LogEvent) -> bool;
}

/// Adds properties to an event in flight. Declared under `Enrich`.
pub trait Enricher: Send + Sync {
    fn enrich(&self, event: &mut LogEvent);
}

/// Rewrites a property value into a structured representation, or declines.
/// Declared under `Destructure`; the first policy that accepts wins.
pub trait DestructuringPolicy: Send + Sync {
    fn try_destructure(&self, value: &PropertyValue) -> Option<PropertyValue>;
}

/// Renders an event to text. Formatters are not stages themselves; they are
/// nested component arguments on sinks.
pub trait Formatter: Send + Sync {
    fn format(&self, event: &LogEvent) -> String;
}

/// The optional expression-filtering capability.
///
/// Implementations live in separately registrable provider modules and are
/// located at build time through the filter switch proxy. The accessor pair
/// is the entire contract; a bound switch also participates in filtering.
pub trait ExpressionSwitch: Filter {
    fn expression(&self) -> String;
    fn set_expression(&self, expression: &str);
}
