mod aggregator;
mod naming;

pub use self::aggregator::{
    apply_source_overrides, parse_subscription, AggregationContext, ProxyAggregator,
};
pub use self::naming::{dedup_names, filter_excluded, strip_emojis, NameRegistry};
