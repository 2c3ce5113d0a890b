//! Parser options.

/// Settings that affect how parsing is done or how results are shaped.
///
/// Build with the `with_*` methods:
///
/// ```
/// use nomen::Options;
///
/// let opts = Options::new().with_details(true).jobs_num(4);
/// assert!(opts.with_details);
/// ```
#[derive(Clone, Debug)]
pub struct Options {
    /// Attach the details tree and the word list to results.
    pub with_details: bool,
    /// Strip known HTML tags and entities before parsing.
    pub ignore_html_tags: bool,
    /// Upper-case a lower-case leading letter.
    pub with_capitalization: bool,
    /// Reject cultivar grammar branches.
    pub disable_cultivars: bool,
    /// Let `parse_many` return results in completion order.
    pub with_no_order: bool,
    /// Report `test_version` instead of the real parser version.
    pub is_test: bool,
    /// Level of parallelism and the engine pool size.
    pub jobs_num: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            with_details: false,
            ignore_html_tags: false,
            with_capitalization: false,
            disable_cultivars: false,
            with_no_order: false,
            is_test: false,
            jobs_num: std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Options::default()
    }

    pub fn with_details(mut self, value: bool) -> Self {
        self.with_details = value;
        self
    }

    pub fn ignore_html_tags(mut self, value: bool) -> Self {
        self.ignore_html_tags = value;
        self
    }

    pub fn with_capitalization(mut self, value: bool) -> Self {
        self.with_capitalization = value;
        self
    }

    pub fn disable_cultivars(mut self, value: bool) -> Self {
        self.disable_cultivars = value;
        self
    }

    pub fn with_no_order(mut self, value: bool) -> Self {
        self.with_no_order = value;
        self
    }

    pub fn is_test(mut self, value: bool) -> Self {
        self.is_test = value;
        self
    }

    pub fn jobs_num(mut self, value: usize) -> Self {
        self.jobs_num = value.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::new();
        assert!(!opts.with_details);
        assert!(!opts.ignore_html_tags);
        assert!(!opts.is_test);
        assert!(opts.jobs_num >= 1);
    }

    #[test]
    fn builder_chains() {
        let opts = Options::new()
            .with_details(true)
            .ignore_html_tags(true)
            .with_capitalization(true)
            .disable_cultivars(true)
            .with_no_order(true)
            .is_test(true)
            .jobs_num(3);
        assert!(opts.with_details);
        assert!(opts.ignore_html_tags);
        assert!(opts.with_capitalization);
        assert!(opts.disable_cultivars);
        assert!(opts.with_no_order);
        assert!(opts.is_test);
        assert_eq!(opts.jobs_num, 3);
    }

    #[test]
    fn jobs_num_is_at_least_one() {
        assert_eq!(Options::new().jobs_num(0).jobs_num, 1);
    }
}
