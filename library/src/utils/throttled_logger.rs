use log::info;

/// Lets through every `interval`-th message; per-tick reports would flood the log otherwise.
pub(crate) struct ThrottledInfoLogger {
    interval: usize,
    counter: usize,
}

impl ThrottledInfoLogger {
    #[must_use]
    pub(crate) fn new(interval: usize) -> Self {
        assert!(interval > 0, "interval must be greater than 0");
        Self {
            interval,
            counter: 0,
        }
    }

    /// The message is only built when it is going to be written.
    pub(crate) fn do_write<Message: FnOnce() -> String>(&mut self, make_message: Message) -> bool {
        self.counter = self.counter.wrapping_add(1);
        if self.counter % self.interval == 0 {
            info!("{}", make_message());
            return true;
        }
        false
    }
}
