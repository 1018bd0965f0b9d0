pub(crate) mod throttled_logger;
