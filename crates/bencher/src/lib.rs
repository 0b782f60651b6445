/// A captured mongrel2 request message used as benchmark input.
#[derive(Debug, Copy, Clone)]
pub struct Fixture {
    name: &'static str,
    frame: &'static [u8],
}

impl Fixture {
    pub const fn new(name: &'static str, frame: &'static [u8]) -> Self {
        Self { name, frame }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn frame(&self) -> &'static [u8] {
        self.frame
    }

    /// Frame size in bytes, for throughput reporting.
    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }
}

pub static GET_SMALL: Fixture = Fixture::new("get_small", include_bytes!("../resources/envelope/get_small.txt"));
pub static POST_LARGE: Fixture = Fixture::new("post_large", include_bytes!("../resources/envelope/post_large.txt"));

pub fn fixtures() -> [Fixture; 2] {
    [GET_SMALL, POST_LARGE]
}
