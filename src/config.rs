/// Limits of a runtime state, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Value stack capacity.
    pub stack_size: usize,
    /// Longest accepted token, in bytes.
    pub name_len: usize,
    /// Deepest nested compound call.
    pub max_depth: usize,
}

pub const DEFAULT_STACK_SIZE: usize = 1024;
pub const DEFAULT_NAME_LEN: usize = 31;
pub const DEFAULT_MAX_DEPTH: usize = 256;

impl Default for Config {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            name_len: DEFAULT_NAME_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn with_stack_size(mut self, n: usize) -> Self {
        self.stack_size = n;
        self
    }

    pub fn with_name_len(mut self, n: usize) -> Self {
        self.name_len = n;
        self
    }

    pub fn with_max_depth(mut self, n: usize) -> Self {
        self.max_depth = n;
        self
    }
}

#[test]
fn test_config_builder() {
    let c = Config::default().with_stack_size(8).with_max_depth(2);
    assert_eq!(8, c.stack_size);
    assert_eq!(DEFAULT_NAME_LEN, c.name_len);
    assert_eq!(2, c.max_depth);
}
