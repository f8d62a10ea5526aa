//! Point building and delivery to the time-series store
//!
//! Records become [`MetricPoint`]s stamped with their construction time. Points are
//! encoded as InfluxDB line protocol and handed to a [`TimeSeriesWriter`] through a
//! [`SinkAdapter`], which buffers them in a bounded [`Outbox`] and guarantees a final
//! drain and close via [`SinkAdapter::scoped`].

mod adapter;
mod line_protocol;
mod outbox;
mod point;
mod writer;

pub use adapter::{DEFAULT_OUTBOX_CAPACITY, SinkAdapter};
pub use line_protocol::{encode_batch, encode_point, encode_value};
pub use outbox::Outbox;
pub use point::{MetricPoint, build_points};
pub use writer::{InfluxWriter, StdoutWriter, TimeSeriesWriter};
