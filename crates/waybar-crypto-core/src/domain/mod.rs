//! # Domain Models
//!
//! Typed building blocks shared by configuration loading and rendering.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`MetricId`] | Closed set of displayable quote metrics |
//! | [`FormatTemplate`] | Parsed `{val:.{dp}f}` display template |
//! | [`FormatTable`] | Built-in template per metric |
//! | [`FormatResolver`] | Layered template lookup for one asset |
//! | [`Precisions`] | Per-asset decimal places by category |
//! | [`QuotesLatest`] | Latest-quotes API response |
//! | [`UtcDateTime`] | UTC timestamp |

mod format;
mod metric;
mod precision;
mod quote;
mod timestamp;

pub use format::{FormatOverrides, FormatResolver, FormatTable, FormatTemplate, VALUE_SLOT};
pub use metric::{parse_metric_list, MetricId, DEFAULT_METRICS};
pub use precision::{
    category_for, select_precision, PrecisionCategory, Precisions, DEFAULT_PRECISION,
    MAX_PRECISION, PRECISION_RULES,
};
pub use quote::{find_asset, QuoteData, QuoteEntry, QuotesLatest, ResponseStatus};
pub use timestamp::UtcDateTime;
